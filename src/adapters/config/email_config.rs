use std::fmt::Debug;

use super::redact;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct EmailConfig {
    pub smtp_user: Option<String>,
    pub smtp_app_password: Option<String>,
    pub notification_email: Option<String>,
}

impl Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_user", &self.smtp_user)
            .field("smtp_app_password", &redact(&self.smtp_app_password))
            .field("notification_email", &self.notification_email)
            .finish()
    }
}
