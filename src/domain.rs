pub mod venmo_transaction;
