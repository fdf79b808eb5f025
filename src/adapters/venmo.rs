pub mod transaction;
pub mod venmo_client;
