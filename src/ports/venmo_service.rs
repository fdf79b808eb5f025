use super::service_client::{ServiceClient, ServiceClientError};
use crate::domain::venmo_transaction::VenmoTransaction;

#[async_trait::async_trait]
pub trait VenmoService: ServiceClient {
    /// Fetches the most recent payments the authenticated user took part in, newest first.
    async fn fetch_transactions(
        &self,
        limit: u32,
    ) -> error_stack::Result<Vec<VenmoTransaction>, ServiceClientError>;
}
