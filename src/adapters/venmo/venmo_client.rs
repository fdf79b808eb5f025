use std::{fmt::Debug, time::Duration};

use error_stack::{report, ResultExt};
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::instrument;

use super::transaction::{MeResponse, StoriesResponse};
use crate::{
    adapters::config::venmo_config::VenmoConfig,
    domain::venmo_transaction::VenmoTransaction,
    ports::{
        service_client::{ServiceClient, ServiceClientError},
        venmo_service::VenmoService,
    },
};

const VENMO_API_BASE: &str = "https://api.venmo.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
struct VenmoSession {
    user_id: String,
    username: Option<String>,
}

pub struct VenmoClient {
    config: VenmoConfig,
    http: Client,
    session: RwLock<Option<VenmoSession>>,
}

impl Debug for VenmoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VenmoClient {{ config: {:?} }}", self.config)
    }
}

impl VenmoClient {
    #[instrument(name = "VenmoClient::new")]
    pub fn new(config: &VenmoConfig) -> error_stack::Result<Self, ServiceClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .change_context(ServiceClientError::InvalidConfiguration("HTTP client"))?;

        Ok(VenmoClient {
            config: config.clone(),
            http,
            session: RwLock::new(None),
        })
    }

    fn access_token(&self) -> error_stack::Result<&str, ServiceClientError> {
        match self.config.access_token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(report!(ServiceClientError::MissingConfiguration(
                "VENMO_ACCESS_TOKEN"
            ))),
        }
    }

    async fn user_id(&self) -> error_stack::Result<String, ServiceClientError> {
        let guard = self.session.read().await;
        guard
            .as_ref()
            .map(|session| session.user_id.clone())
            .ok_or(report!(ServiceClientError::NotConnected))
    }
}

#[async_trait::async_trait]
impl ServiceClient for VenmoClient {
    fn name(&self) -> &str {
        "venmo"
    }

    #[instrument]
    async fn connect(&self) -> error_stack::Result<(), ServiceClientError> {
        let token = self.access_token()?;

        let me = self
            .http
            .get(format!("{}/me", VENMO_API_BASE))
            .bearer_auth(token)
            .send()
            .await
            .change_context(ServiceClientError::ConnectFailed)?
            .error_for_status()
            .change_context(ServiceClientError::ConnectFailed)
            .attach_printable("Venmo rejected the access token")?
            .json::<MeResponse>()
            .await
            .change_context(ServiceClientError::ConnectFailed)?;

        let session = VenmoSession {
            user_id: me.data.user.id,
            username: me.data.user.username,
        };
        tracing::info!("Connected to Venmo as {:?}", session.username);

        {
            // -- MUTEX WRITE --
            let mut guard = self.session.write().await;
            guard.replace(session);
            // -- END MUTEX WRITE --
        }
        Ok(())
    }

    // The access token is long-lived and shared with other tools, so it is never revoked here.
    #[instrument]
    async fn disconnect(&self) -> error_stack::Result<(), ServiceClientError> {
        let previous = self.session.write().await.take();
        if previous.is_some() {
            tracing::debug!("Venmo session released");
        }
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.session.read().await.is_some()
    }
}

#[async_trait::async_trait]
impl VenmoService for VenmoClient {
    #[instrument]
    async fn fetch_transactions(
        &self,
        limit: u32,
    ) -> error_stack::Result<Vec<VenmoTransaction>, ServiceClientError> {
        let user_id = self.user_id().await?;
        let token = self.access_token()?;

        let stories = self
            .http
            .get(format!("{}/stories/target-or-actor/{}", VENMO_API_BASE, user_id))
            .query(&[("limit", limit)])
            .bearer_auth(token)
            .send()
            .await
            .change_context(ServiceClientError::RequestFailed("fetch transactions"))?
            .error_for_status()
            .change_context(ServiceClientError::RequestFailed("fetch transactions"))?
            .json::<StoriesResponse>()
            .await
            .change_context(ServiceClientError::RequestFailed("fetch transactions"))
            .attach_printable_lazy(|| format!("Unexpected story feed for user {}", user_id))?;

        Ok(stories.into_transactions())
    }
}
