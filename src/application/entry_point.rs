use error_stack::Report;
use tracing::instrument;

use super::service_container::ServiceContainer;
use crate::{adapters::config::app_config::AppConfig, ports::app_error::AppError};

/// Context label attached to error notifications sent from the top-level boundary.
pub const MAIN_CONTEXT: &str = "main execution";

/// The payment-processing step that runs while every service is connected.
#[async_trait::async_trait]
pub trait PaymentWorkflow: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, container: &ServiceContainer) -> error_stack::Result<(), AppError>;
}

/// Stands in for the reconciliation workflow, which does not exist yet.
pub struct PlaceholderWorkflow;

#[async_trait::async_trait]
impl PaymentWorkflow for PlaceholderWorkflow {
    fn name(&self) -> &str {
        "payment processing"
    }

    async fn run(&self, _container: &ServiceContainer) -> error_stack::Result<(), AppError> {
        tracing::info!("Starting payment processing...");
        Ok(())
    }
}

/// Builds the container from `config` and runs the placeholder workflow.
#[instrument(skip_all)]
pub async fn run(config: &AppConfig) -> error_stack::Result<(), AppError> {
    let container = match ServiceContainer::new(config) {
        Ok(container) => container,
        Err(report) => {
            // Nothing was constructed, so there is nothing to release or notify with.
            tracing::error!("Error in main ({}): {:?}", report.current_context().kind(), report);
            return Err(report);
        }
    };

    run_with(container, &PlaceholderWorkflow).await
}

/// Connects `container`, runs `workflow` and always disconnects before returning.
///
/// This is the single error boundary of the process: any failure is logged, the container is
/// disconnected and an error notification is attempted. The original error is returned even if
/// the notification fails.
#[instrument(skip_all, fields(workflow = workflow.name()))]
pub async fn run_with(
    mut container: ServiceContainer,
    workflow: &dyn PaymentWorkflow,
) -> error_stack::Result<(), AppError> {
    match execute(&mut container, workflow).await {
        Ok(()) => {
            container.disconnect().await;
            tracing::info!("✅ {}: OK", workflow.name());
            Ok(())
        }
        Err(report) => {
            handle_failure(&mut container, &report).await;
            Err(report)
        }
    }
}

async fn execute(
    container: &mut ServiceContainer,
    workflow: &dyn PaymentWorkflow,
) -> error_stack::Result<(), AppError> {
    container.connect().await?;
    container.ensure_connected()?;
    workflow.run(container).await
}

async fn handle_failure(container: &mut ServiceContainer, report: &Report<AppError>) {
    let phase = match report.current_context() {
        AppError::Configuration { .. } => "configuring services",
        AppError::Connection { .. } => "connecting services",
        AppError::Unhandled { .. } => "running the workflow",
    };
    tracing::error!("❌ Error in main while {}: {:?}", phase, report);

    container.disconnect().await;

    let error = format!("{:#}", report);
    if let Err(notification_report) = container
        .email_service()
        .send_error_notification(&error, MAIN_CONTEXT)
        .await
    {
        tracing::error!(
            "Failed to send error notification, giving up: {:?}",
            notification_report
        );
    }
}
