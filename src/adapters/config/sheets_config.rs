use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoogleSheetsConfig {
    pub credentials_path: Option<PathBuf>, // service account key (JSON), opened on connect
    pub spreadsheet_id: Option<String>,
}
