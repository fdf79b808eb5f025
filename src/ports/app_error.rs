use thiserror::Error;

/// Every failure that reaches the entry point is one of these.
#[derive(Error, Debug, strum::IntoStaticStr)]
pub enum AppError {
    #[error("Configuration error: {details}")]
    Configuration { details: String },
    #[error("Connection error: {service} could not establish its session")]
    Connection { service: String },
    #[error("Unhandled error: {details}")]
    Unhandled { details: String },
}

impl AppError {
    pub fn configuration<S: Into<String>>(details: S) -> Self {
        AppError::Configuration {
            details: details.into(),
        }
    }

    pub fn connection<S: Into<String>>(service: S) -> Self {
        AppError::Connection {
            service: service.into(),
        }
    }

    pub fn unhandled<S: Into<String>>(details: S) -> Self {
        AppError::Unhandled {
            details: details.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
