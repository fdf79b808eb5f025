use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use error_stack::report;

use crate::{
    domain::venmo_transaction::VenmoTransaction,
    ports::{
        email_service::EmailService,
        service_client::{ServiceClient, ServiceClientError},
        sheets_service::{SheetRow, SheetsService},
        venmo_service::VenmoService,
    },
};

/// In-memory stand-in for any of the three clients. Connecting flips a flag.
#[derive(Debug, Default)]
pub struct MockService {
    pub label: &'static str,
    required_token: Option<Option<String>>,
    fail_connect: bool,
    fail_disconnect: bool,
    fail_notification: bool,
    connected: AtomicBool,
    connect_calls: AtomicUsize,
    disconnect_calls: AtomicUsize,
    notifications: Mutex<Vec<(String, String)>>,
}

impl MockService {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }

    /// A Venmo stand-in that refuses to connect with an absent or empty token.
    pub fn venmo_with_token(token: Option<String>) -> Self {
        Self {
            required_token: Some(token),
            ..Self::new("venmo")
        }
    }

    pub fn failing_connect(self) -> Self {
        Self {
            fail_connect: true,
            ..self
        }
    }

    pub fn failing_disconnect(self) -> Self {
        Self {
            fail_disconnect: true,
            ..self
        }
    }

    pub fn failing_notification(self) -> Self {
        Self {
            fail_notification: true,
            ..self
        }
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn disconnect_calls(&self) -> usize {
        self.disconnect_calls.load(Ordering::SeqCst)
    }

    /// `(error, context)` pairs passed to `send_error_notification`.
    pub fn notifications(&self) -> Vec<(String, String)> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ServiceClient for MockService {
    fn name(&self) -> &str {
        self.label
    }

    async fn connect(&self) -> error_stack::Result<(), ServiceClientError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(token) = &self.required_token {
            if token.as_deref().unwrap_or_default().is_empty() {
                return Err(report!(ServiceClientError::MissingConfiguration(
                    "VENMO_ACCESS_TOKEN"
                )));
            }
        }
        if self.fail_connect {
            return Err(report!(ServiceClientError::ConnectFailed));
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> error_stack::Result<(), ServiceClientError> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_disconnect {
            return Err(report!(ServiceClientError::DisconnectFailed));
        }
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl VenmoService for MockService {
    async fn fetch_transactions(
        &self,
        _limit: u32,
    ) -> error_stack::Result<Vec<VenmoTransaction>, ServiceClientError> {
        Ok(Vec::new())
    }
}

#[async_trait::async_trait]
impl EmailService for MockService {
    async fn send_email(
        &self,
        _subject: &str,
        _body: &str,
    ) -> error_stack::Result<(), ServiceClientError> {
        Ok(())
    }

    async fn send_error_notification(
        &self,
        error: &str,
        context: &str,
    ) -> error_stack::Result<(), ServiceClientError> {
        self.notifications
            .lock()
            .unwrap()
            .push((error.to_string(), context.to_string()));
        if self.fail_notification {
            return Err(report!(ServiceClientError::RequestFailed("send email")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SheetsService for MockService {
    async fn read_rows(
        &self,
        _range: &str,
    ) -> error_stack::Result<Vec<SheetRow>, ServiceClientError> {
        Ok(Vec::new())
    }

    async fn append_rows(
        &self,
        _range: &str,
        _rows: &[SheetRow],
    ) -> error_stack::Result<(), ServiceClientError> {
        Ok(())
    }

    async fn write_rows(
        &self,
        _range: &str,
        _rows: &[SheetRow],
    ) -> error_stack::Result<(), ServiceClientError> {
        Ok(())
    }
}
