pub mod config;
pub mod email;
pub mod sheets;
pub mod venmo;
