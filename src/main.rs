use std::process::ExitCode;

use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt, Registry};
use venmo_reconcile::{
    application::entry_point, prettyprint::prettyprint::PrettyFormatter, AppConfig,
};

const LOG_FILE: &str = "venmo_reconcile.log";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = AppConfig::load();
    let level = config
        .as_ref()
        .ok()
        .and_then(AppConfig::tracing_level)
        .unwrap_or(tracing::Level::INFO);
    if let Err(e) = setup_tracing(level) {
        eprintln!("Failed to set up logging: {e}");
    }
    setup_panic_hook();

    let config = match config {
        Ok(config) => config,
        Err(report) => {
            tracing::error!("Error in main: {:?}", report);
            return ExitCode::FAILURE;
        }
    };
    if config.tracing_level().is_none() {
        tracing::warn!("Unknown LOG_LEVEL '{}', using INFO", config.log_level);
    }

    match entry_point::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already logged and reported by the entry point.
        Err(_) => ExitCode::FAILURE,
    }
}

fn setup_tracing(level: tracing::Level) -> Result<(), Box<dyn std::error::Error>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create(LOG_FILE)?)
        .with_ansi(false);

    Registry::default()
        .with(Targets::new().with_target("venmo_reconcile", level))
        .with(log_file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
