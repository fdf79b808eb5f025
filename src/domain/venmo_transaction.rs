use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PaymentAction {
    Pay,
    Charge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenmoTransaction {
    pub id: String,
    pub action: PaymentAction,
    pub amount: f64,
    pub note: String,
    pub actor: String,
    pub target: String,
    pub status: String,
    pub date_created: DateTime<Utc>,
}
