use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceClientError {
    #[error("Missing configuration value: {0}")]
    MissingConfiguration(&'static str),
    #[error("Invalid configuration value: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Failed to establish session")]
    ConnectFailed,
    #[error("Failed to release session")]
    DisconnectFailed,
    #[error("Client is not connected")]
    NotConnected,
    #[error("Request failed: {0}")]
    RequestFailed(&'static str),
}

/// Connection lifecycle shared by every external integration.
#[async_trait::async_trait]
pub trait ServiceClient: Send + Sync {
    fn name(&self) -> &str;

    /// Establishes the underlying session. Required configuration is checked here, not at
    /// construction.
    async fn connect(&self) -> error_stack::Result<(), ServiceClientError>;

    /// Releases the session. Does nothing if the client never connected.
    async fn disconnect(&self) -> error_stack::Result<(), ServiceClientError>;

    async fn is_connected(&self) -> bool;
}
