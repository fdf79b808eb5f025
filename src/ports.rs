pub mod app_error;
pub mod email_service;
pub mod service_client;
pub mod sheets_service;
pub mod venmo_service;
