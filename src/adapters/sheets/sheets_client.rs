use std::fmt::Debug;

use error_stack::{report, ResultExt};
use google_sheets4::{api::ValueRange, Sheets};
use tokio::sync::RwLock;
use tracing::instrument;

use super::{
    auth::{self},
    http_client::{self, HttpsConnector},
    value_range_factory::ValueRangeFactory,
};
use crate::{
    adapters::config::sheets_config::GoogleSheetsConfig,
    ports::{
        service_client::{ServiceClient, ServiceClientError},
        sheets_service::{SheetRow, SheetsService},
    },
};

struct SheetsSession {
    hub: Sheets<HttpsConnector>,
    spreadsheet_id: String,
}

pub struct SheetsClient {
    config: GoogleSheetsConfig,
    session: RwLock<Option<SheetsSession>>,
}

impl Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SheetsClient {{ config: {:?} }}", self.config)
    }
}

impl SheetsClient {
    /// Only records the configuration. The credentials file is opened on connect.
    pub fn new(config: &GoogleSheetsConfig) -> Self {
        SheetsClient {
            config: config.clone(),
            session: RwLock::new(None),
        }
    }
}

#[async_trait::async_trait]
impl ServiceClient for SheetsClient {
    fn name(&self) -> &str {
        "sheets"
    }

    #[instrument]
    async fn connect(&self) -> error_stack::Result<(), ServiceClientError> {
        let credentials_path = self
            .config
            .credentials_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or(report!(ServiceClientError::MissingConfiguration(
                "GOOGLE_SHEETS_CREDENTIALS_PATH"
            )))?;
        let spreadsheet_id = self
            .config
            .spreadsheet_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(report!(ServiceClientError::MissingConfiguration(
                "GOOGLE_SHEETS_SPREADSHEET_ID"
            )))?;

        let secret = auth::read_service_account_key(credentials_path).await?;
        let client = http_client::http_client()?;
        let auth = auth::auth(secret, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        let (_, spreadsheet) = hub
            .spreadsheets()
            .get(spreadsheet_id)
            .doit()
            .await
            .change_context(ServiceClientError::ConnectFailed)
            .attach_printable_lazy(|| {
                format!("Could not open spreadsheet {}", spreadsheet_id)
            })?;

        let title = spreadsheet.properties.and_then(|properties| properties.title);
        tracing::info!("Connected to spreadsheet {:?}", title);

        {
            // -- MUTEX WRITE --
            let mut guard = self.session.write().await;
            guard.replace(SheetsSession {
                hub,
                spreadsheet_id: spreadsheet_id.to_string(),
            });
            // -- END MUTEX WRITE --
        }
        Ok(())
    }

    #[instrument]
    async fn disconnect(&self) -> error_stack::Result<(), ServiceClientError> {
        if self.session.write().await.take().is_some() {
            tracing::debug!("Sheets session released");
        }
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.session.read().await.is_some()
    }
}

#[async_trait::async_trait]
impl SheetsService for SheetsClient {
    #[instrument]
    async fn read_rows(
        &self,
        range: &str,
    ) -> error_stack::Result<Vec<SheetRow>, ServiceClientError> {
        let guard = self.session.read().await;
        let session = guard
            .as_ref()
            .ok_or(report!(ServiceClientError::NotConnected))?;

        let (_, value_range) = session
            .hub
            .spreadsheets()
            .values_get(&session.spreadsheet_id, range)
            .doit()
            .await
            .change_context(ServiceClientError::RequestFailed("read rows"))
            .attach_printable_lazy(|| format!("Failed to read range {}", range))?;

        Ok(value_range.into_rows())
    }

    #[instrument(skip(rows), fields(row_count = rows.len()))]
    async fn append_rows(
        &self,
        range: &str,
        rows: &[SheetRow],
    ) -> error_stack::Result<(), ServiceClientError> {
        let guard = self.session.read().await;
        let session = guard
            .as_ref()
            .ok_or(report!(ServiceClientError::NotConnected))?;

        session
            .hub
            .spreadsheets()
            .values_append(ValueRange::from_rows(rows), &session.spreadsheet_id, range)
            .value_input_option("USER_ENTERED")
            .doit()
            .await
            .map(|_| ())
            .change_context(ServiceClientError::RequestFailed("append rows"))
            .attach_printable_lazy(|| format!("Failed to append to range {}", range))
    }

    #[instrument(skip(rows), fields(row_count = rows.len()))]
    async fn write_rows(
        &self,
        range: &str,
        rows: &[SheetRow],
    ) -> error_stack::Result<(), ServiceClientError> {
        let guard = self.session.read().await;
        let session = guard
            .as_ref()
            .ok_or(report!(ServiceClientError::NotConnected))?;

        session
            .hub
            .spreadsheets()
            .values_update(ValueRange::from_rows(rows), &session.spreadsheet_id, range)
            .value_input_option("USER_ENTERED")
            .doit()
            .await
            .map(|_| ())
            .change_context(ServiceClientError::RequestFailed("write rows"))
            .attach_printable_lazy(|| format!("Failed to write to range {}", range))
    }
}
