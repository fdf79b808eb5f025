// Public API exports
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod prettyprint;

// Re-export key types for easy access
pub use adapters::config::app_config::AppConfig;
pub use application::service_container::{ContainerState, ServiceContainer};
pub use ports::app_error::AppError;
