use chrono::{DateTime, Utc};

pub const SUBJECT_PREFIX: &str = "[venmo-reconcile]";

#[derive(Debug)]
pub struct ErrorNotification<'a> {
    pub error: &'a str,
    pub context: &'a str,
    pub occurred_at: DateTime<Utc>,
}

impl<'a> ErrorNotification<'a> {
    pub fn new(error: &'a str, context: &'a str) -> Self {
        Self {
            error,
            context,
            occurred_at: Utc::now(),
        }
    }

    pub fn subject(&self) -> String {
        format!("{} Error in {}", SUBJECT_PREFIX, self.context)
    }

    pub fn body(&self) -> String {
        format!(
            "An error occurred during {}.\n\nTime: {}\n\nError:\n{}\n",
            self.context,
            self.occurred_at.to_rfc3339(),
            self.error
        )
    }
}
