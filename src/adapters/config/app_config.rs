use std::{path::PathBuf, str::FromStr};

use config::{Config, Environment};
use error_stack::ResultExt;
use serde::Deserialize;
use tracing::{instrument, Level};

use super::{
    email_config::EmailConfig, sheets_config::GoogleSheetsConfig, venmo_config::VenmoConfig,
};
use crate::ports::app_error::AppError;

pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Every environment variable the loader reads. Anything else in the source mapping is ignored.
pub const ENV_KEYS: [&str; 9] = [
    "VENMO_ACCESS_TOKEN",
    "VENMO_CLIENT_ID",
    "VENMO_CLIENT_SECRET",
    "EMAIL_USER",
    "EMAIL_APP_PASSWORD",
    "NOTIFICATION_EMAIL",
    "GOOGLE_SHEETS_CREDENTIALS_PATH",
    "GOOGLE_SHEETS_SPREADSHEET_ID",
    "LOG_LEVEL",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub venmo: VenmoConfig,
    pub email: EmailConfig,
    pub google_sheets: GoogleSheetsConfig,
    pub log_level: String,
}

// `config::Environment` lowercases keys, so fields mirror the variable names.
#[derive(Deserialize)]
struct EnvConfig {
    venmo_access_token: Option<String>,
    venmo_client_id: Option<String>,
    venmo_client_secret: Option<String>,
    email_user: Option<String>,
    email_app_password: Option<String>,
    notification_email: Option<String>,
    google_sheets_credentials_path: Option<String>,
    google_sheets_spreadsheet_id: Option<String>,
    log_level: String,
}

impl From<EnvConfig> for AppConfig {
    fn from(env: EnvConfig) -> Self {
        AppConfig {
            venmo: VenmoConfig {
                access_token: env.venmo_access_token,
                client_id: env.venmo_client_id,
                client_secret: env.venmo_client_secret,
            },
            email: EmailConfig {
                smtp_user: env.email_user,
                smtp_app_password: env.email_app_password,
                notification_email: env.notification_email,
            },
            google_sheets: GoogleSheetsConfig {
                credentials_path: env.google_sheets_credentials_path.map(PathBuf::from),
                spreadsheet_id: env.google_sheets_spreadsheet_id,
            },
            log_level: env.log_level,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    ///
    /// Variables that are not valid UTF-8 are skipped, so an unrelated malformed variable does not
    /// stop the process.
    pub fn load() -> error_stack::Result<Self, AppError> {
        let vars = std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        });
        Self::from_env(vars)
    }

    /// Loads the configuration from an explicit key-value mapping.
    ///
    /// Values are taken verbatim and nothing is validated here: missing credentials are reported
    /// by the client that needs them when it connects.
    #[instrument(name = "AppConfig::from_env", skip(vars))]
    pub fn from_env<I, K, V>(vars: I) -> error_stack::Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .filter(|(key, _)| ENV_KEYS.contains(&key.as_str()))
            .collect::<config::Map<String, String>>();

        tracing::trace!("Read {} known variables from the environment", source.len());

        let env = Config::builder()
            .set_default("log_level", DEFAULT_LOG_LEVEL)
            .change_context(AppError::configuration("invalid default for LOG_LEVEL"))?
            .add_source(Environment::default().source(Some(source)))
            .build()
            .change_context(AppError::configuration("failed to read the environment"))?
            .try_deserialize::<EnvConfig>()
            .change_context(AppError::configuration(
                "failed to deserialize the environment",
            ))?;

        Ok(env.into())
    }

    /// Maps `log_level` to a tracing level. Python-style `WARNING` and `CRITICAL` are accepted
    /// since existing `.env` files use them.
    pub fn tracing_level(&self) -> Option<Level> {
        match self.log_level.to_uppercase().as_str() {
            "WARNING" => Some(Level::WARN),
            "CRITICAL" | "FATAL" => Some(Level::ERROR),
            other => Level::from_str(other).ok(),
        }
    }
}
