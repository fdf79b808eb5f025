use std::{fmt::Debug, sync::Arc};

use error_stack::{report, ResultExt};
use tracing::instrument;

use crate::{
    adapters::{
        config::app_config::AppConfig, email::email_client::EmailClient,
        sheets::sheets_client::SheetsClient, venmo::venmo_client::VenmoClient,
    },
    ports::{
        app_error::AppError, email_service::EmailService, service_client::ServiceClient,
        sheets_service::SheetsService, venmo_service::VenmoService,
    },
};

/// `Constructed -> Connected -> Disconnected`. There is no way back from `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ContainerState {
    Constructed,
    Connected,
    Disconnected,
}

pub struct ServiceContainer {
    venmo: Arc<dyn VenmoService>,
    email: Arc<dyn EmailService>,
    sheets: Arc<dyn SheetsService>,
    state: ContainerState,
}

impl Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ServiceContainer {{ services: [{}, {}, {}], state: {} }}",
            self.venmo.name(),
            self.email.name(),
            self.sheets.name(),
            self.state
        )
    }
}

async fn connect_client<C: ServiceClient + ?Sized>(
    client: &C,
) -> error_stack::Result<(), AppError> {
    client
        .connect()
        .await
        .change_context(AppError::connection(client.name()))?;
    tracing::info!("✅ {}: connected", client.name());
    Ok(())
}

async fn disconnect_client<C: ServiceClient + ?Sized>(client: &C) {
    match client.disconnect().await {
        Ok(()) => tracing::debug!("{}: disconnected", client.name()),
        Err(report) => tracing::warn!("❌ {}: cleanup failed: {:?}", client.name(), report),
    }
}

impl ServiceContainer {
    /// Builds the real clients. No network I/O happens until [`ServiceContainer::connect`].
    #[instrument(name = "ServiceContainer::new", skip(config))]
    pub fn new(config: &AppConfig) -> error_stack::Result<Self, AppError> {
        let venmo = VenmoClient::new(&config.venmo)
            .change_context(AppError::configuration("Venmo client could not be created"))?;
        let email = EmailClient::new(&config.email)
            .change_context(AppError::configuration("email client could not be created"))?;
        let sheets = SheetsClient::new(&config.google_sheets);

        Ok(Self::with_services(
            Arc::new(venmo),
            Arc::new(email),
            Arc::new(sheets),
        ))
    }

    pub fn with_services(
        venmo: Arc<dyn VenmoService>,
        email: Arc<dyn EmailService>,
        sheets: Arc<dyn SheetsService>,
    ) -> Self {
        Self {
            venmo,
            email,
            sheets,
            state: ContainerState::Constructed,
        }
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn venmo_service(&self) -> &dyn VenmoService {
        self.venmo.as_ref()
    }

    pub fn email_service(&self) -> &dyn EmailService {
        self.email.as_ref()
    }

    pub fn sheets_service(&self) -> &dyn SheetsService {
        self.sheets.as_ref()
    }

    pub fn ensure_connected(&self) -> error_stack::Result<(), AppError> {
        if self.state == ContainerState::Connected {
            return Ok(());
        }
        Err(report!(AppError::unhandled(format!(
            "services used while the container is {}",
            self.state
        ))))
    }

    /// Connects Venmo, email and Sheets in that order and stops at the first failure.
    ///
    /// A failed connect leaves the state at `Constructed`; the caller still has to call
    /// [`ServiceContainer::disconnect`] to release whatever did connect.
    #[instrument(skip(self), fields(state = %self.state))]
    pub async fn connect(&mut self) -> error_stack::Result<(), AppError> {
        match self.state {
            ContainerState::Constructed => {}
            ContainerState::Connected => {
                tracing::debug!("Container already connected");
                return Ok(());
            }
            ContainerState::Disconnected => {
                return Err(report!(AppError::connection("service container")))
                    .attach_printable("The container was disconnected and cannot reconnect");
            }
        }

        connect_client(self.venmo.as_ref()).await?;
        connect_client(self.email.as_ref()).await?;
        connect_client(self.sheets.as_ref()).await?;

        self.state = ContainerState::Connected;
        tracing::info!("All services connected");
        Ok(())
    }

    /// Releases every client, whatever the current state. Each teardown runs even if another one
    /// fails; failures are logged, never returned.
    #[instrument(skip(self), fields(state = %self.state))]
    pub async fn disconnect(&mut self) {
        futures::join!(
            disconnect_client(self.venmo.as_ref()),
            disconnect_client(self.email.as_ref()),
            disconnect_client(self.sheets.as_ref()),
        );

        self.state = ContainerState::Disconnected;
        tracing::info!("All services disconnected");
    }
}
