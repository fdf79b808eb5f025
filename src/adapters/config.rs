pub mod app_config;
pub mod email_config;
pub mod sheets_config;
pub mod venmo_config;

/// Debug representation of a secret that only tells whether it is present.
pub(crate) fn redact(secret: &Option<String>) -> &'static str {
    match secret.as_deref() {
        Some("") => "<empty>",
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}
