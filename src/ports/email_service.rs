use super::service_client::{ServiceClient, ServiceClientError};

#[async_trait::async_trait]
pub trait EmailService: ServiceClient {
    /// Sends a plain-text email to the configured notification address.
    async fn send_email(
        &self,
        subject: &str,
        body: &str,
    ) -> error_stack::Result<(), ServiceClientError>;

    /// Reports a failure that happened during `context`. Works whether or not the client is
    /// connected.
    async fn send_error_notification(
        &self,
        error: &str,
        context: &str,
    ) -> error_stack::Result<(), ServiceClientError>;
}
