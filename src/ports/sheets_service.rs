use super::service_client::{ServiceClient, ServiceClientError};

/// One spreadsheet row, one string per cell.
pub type SheetRow = Vec<String>;

#[async_trait::async_trait]
pub trait SheetsService: ServiceClient {
    async fn read_rows(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<SheetRow>, ServiceClientError>;

    /// Appends rows after the last non-empty row of `range`.
    async fn append_rows(
        &self,
        range: &str,
        rows: &[SheetRow],
    ) -> error_stack::Result<(), ServiceClientError>;

    /// Overwrites `range` starting at its top-left cell.
    async fn write_rows(
        &self,
        range: &str,
        rows: &[SheetRow],
    ) -> error_stack::Result<(), ServiceClientError>;
}
