use std::fmt::Debug;

use error_stack::{report, ResultExt};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tokio::sync::RwLock;
use tracing::instrument;

use super::notification::ErrorNotification;
use crate::{
    adapters::config::email_config::EmailConfig,
    ports::{
        email_service::EmailService,
        service_client::{ServiceClient, ServiceClientError},
    },
};

// App passwords are a Gmail feature, so the relay is fixed.
const SMTP_RELAY: &str = "smtp.gmail.com";

type SmtpSession = AsyncSmtpTransport<Tokio1Executor>;

pub struct EmailClient {
    config: EmailConfig,
    from: Option<Mailbox>,
    to: Option<Mailbox>,
    transport: RwLock<Option<SmtpSession>>,
}

impl Debug for EmailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmailClient {{ config: {:?} }}", self.config)
    }
}

fn parse_mailbox(
    value: Option<&str>,
    variable: &'static str,
) -> error_stack::Result<Option<Mailbox>, ServiceClientError> {
    match value {
        None | Some("") => Ok(None),
        Some(address) => address
            .parse::<Mailbox>()
            .map(Some)
            .change_context(ServiceClientError::InvalidConfiguration(variable))
            .attach_printable_lazy(|| format!("'{}' is not an email address", address)),
    }
}

fn non_empty<'a>(
    value: &'a Option<String>,
    variable: &'static str,
) -> error_stack::Result<&'a str, ServiceClientError> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(report!(ServiceClientError::MissingConfiguration(variable))),
    }
}

impl EmailClient {
    /// Parses the addresses up front. Absent values are accepted and only reported on use.
    #[instrument(name = "EmailClient::new")]
    pub fn new(config: &EmailConfig) -> error_stack::Result<Self, ServiceClientError> {
        let from = parse_mailbox(config.smtp_user.as_deref(), "EMAIL_USER")?;
        let to = parse_mailbox(config.notification_email.as_deref(), "NOTIFICATION_EMAIL")?;

        Ok(EmailClient {
            config: config.clone(),
            from,
            to,
            transport: RwLock::new(None),
        })
    }

    fn build_transport(&self) -> error_stack::Result<SmtpSession, ServiceClientError> {
        let user = non_empty(&self.config.smtp_user, "EMAIL_USER")?;
        let password = non_empty(&self.config.smtp_app_password, "EMAIL_APP_PASSWORD")?;

        let transport = SmtpSession::relay(SMTP_RELAY)
            .change_context(ServiceClientError::ConnectFailed)
            .attach_printable_lazy(|| format!("Could not resolve relay {}", SMTP_RELAY))?
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        Ok(transport)
    }

    fn build_message(
        &self,
        subject: &str,
        body: &str,
    ) -> error_stack::Result<Message, ServiceClientError> {
        let from = self
            .from
            .clone()
            .ok_or(report!(ServiceClientError::MissingConfiguration(
                "EMAIL_USER"
            )))?;
        let to = self
            .to
            .clone()
            .ok_or(report!(ServiceClientError::MissingConfiguration(
                "NOTIFICATION_EMAIL"
            )))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .change_context(ServiceClientError::RequestFailed("build email"))
    }

    async fn deliver(&self, message: Message) -> error_stack::Result<(), ServiceClientError> {
        {
            // -- MUTEX READ --
            let guard = self.transport.read().await;
            if let Some(transport) = guard.as_ref() {
                transport
                    .send(message)
                    .await
                    .change_context(ServiceClientError::RequestFailed("send email"))?;
                return Ok(());
            }
            // -- END MUTEX READ --
        }

        tracing::debug!("SMTP session closed, sending through a one-shot transport");
        let transport = self.build_transport()?;
        transport
            .send(message)
            .await
            .change_context(ServiceClientError::RequestFailed("send email"))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ServiceClient for EmailClient {
    fn name(&self) -> &str {
        "email"
    }

    #[instrument]
    async fn connect(&self) -> error_stack::Result<(), ServiceClientError> {
        non_empty(&self.config.notification_email, "NOTIFICATION_EMAIL")?;
        let transport = self.build_transport()?;

        let reachable = transport
            .test_connection()
            .await
            .change_context(ServiceClientError::ConnectFailed)?;
        if !reachable {
            return Err(report!(ServiceClientError::ConnectFailed))
                .attach_printable_lazy(|| format!("{} did not accept the session", SMTP_RELAY));
        }

        tracing::info!("Connected to SMTP relay {}", SMTP_RELAY);
        {
            // -- MUTEX WRITE --
            let mut guard = self.transport.write().await;
            guard.replace(transport);
            // -- END MUTEX WRITE --
        }
        Ok(())
    }

    #[instrument]
    async fn disconnect(&self) -> error_stack::Result<(), ServiceClientError> {
        if self.transport.write().await.take().is_some() {
            tracing::debug!("SMTP session released");
        }
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.transport.read().await.is_some()
    }
}

#[async_trait::async_trait]
impl EmailService for EmailClient {
    #[instrument(skip(body))]
    async fn send_email(
        &self,
        subject: &str,
        body: &str,
    ) -> error_stack::Result<(), ServiceClientError> {
        let message = self.build_message(subject, body)?;
        self.deliver(message).await
    }

    #[instrument]
    async fn send_error_notification(
        &self,
        error: &str,
        context: &str,
    ) -> error_stack::Result<(), ServiceClientError> {
        let notification = ErrorNotification::new(error, context);
        self.send_email(&notification.subject(), &notification.body())
            .await
            .attach_printable_lazy(|| format!("Error notification for {} not sent", context))
    }
}
