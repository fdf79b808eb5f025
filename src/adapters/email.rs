pub mod email_client;
pub mod notification;
