use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::venmo_transaction::{PaymentAction, VenmoTransaction};

#[derive(Deserialize, Debug)]
pub(crate) struct MeResponse {
    pub data: MeData,
}

#[derive(Deserialize, Debug)]
pub(crate) struct MeData {
    pub user: VenmoUser,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct VenmoUser {
    pub id: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
}

impl VenmoUser {
    fn label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct StoriesResponse {
    pub data: Vec<Story>,
}

// Feed entries that are not payments (transfers, refunds) carry no `payment` object.
#[derive(Deserialize, Debug)]
pub(crate) struct Story {
    pub payment: Option<Payment>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Payment {
    pub id: String,
    pub action: String,
    pub amount: f64,
    pub note: Option<String>,
    pub status: String,
    pub date_created: DateTime<Utc>,
    pub actor: VenmoUser,
    pub target: PaymentTarget,
}

#[derive(Deserialize, Debug)]
pub(crate) struct PaymentTarget {
    pub user: Option<VenmoUser>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PaymentTarget {
    fn label(&self) -> String {
        self.user
            .as_ref()
            .map(VenmoUser::label)
            .or_else(|| self.email.clone())
            .or_else(|| self.phone.clone())
            .unwrap_or_default()
    }
}

impl Payment {
    /// `None` when the payment action is neither `pay` nor `charge`.
    pub fn into_transaction(self) -> Option<VenmoTransaction> {
        let action = PaymentAction::from_str(&self.action).ok()?;
        Some(VenmoTransaction {
            target: self.target.label(),
            actor: self.actor.label(),
            id: self.id,
            action,
            amount: self.amount,
            note: self.note.unwrap_or_default(),
            status: self.status,
            date_created: self.date_created,
        })
    }
}

impl StoriesResponse {
    pub fn into_transactions(self) -> Vec<VenmoTransaction> {
        self.data
            .into_iter()
            .filter_map(|story| story.payment)
            .filter_map(|payment| {
                let id = payment.id.clone();
                let transaction = payment.into_transaction();
                if transaction.is_none() {
                    tracing::debug!("Skipping payment {} with unknown action", id);
                }
                transaction
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const STORIES: &str = r#"{
        "data": [
            {
                "id": "story-1",
                "type": "payment",
                "payment": {
                    "id": "3001",
                    "action": "pay",
                    "amount": 42.5,
                    "note": "March rent share",
                    "status": "settled",
                    "date_created": "2024-03-01T18:30:00Z",
                    "actor": { "id": "11", "username": "alice-w", "display_name": "Alice W" },
                    "target": {
                        "type": "user",
                        "user": { "id": "22", "username": "bob-k", "display_name": null }
                    }
                }
            },
            { "id": "story-2", "type": "transfer", "payment": null },
            {
                "id": "story-3",
                "type": "payment",
                "payment": {
                    "id": "3002",
                    "action": "charge",
                    "amount": 12.0,
                    "note": null,
                    "status": "pending",
                    "date_created": "2024-03-02T09:00:00Z",
                    "actor": { "id": "22", "username": null, "display_name": null },
                    "target": { "type": "email", "user": null, "email": "carol@example.com" }
                }
            },
            {
                "id": "story-4",
                "type": "payment",
                "payment": {
                    "id": "3003",
                    "action": "refund",
                    "amount": 5.0,
                    "status": "settled",
                    "date_created": "2024-03-03T09:00:00Z",
                    "actor": { "id": "11" },
                    "target": { "user": { "id": "22" } }
                }
            }
        ]
    }"#;

    #[test]
    fn test_stories_into_transactions() {
        let response: StoriesResponse =
            serde_json::from_str(STORIES).expect("sample feed should deserialize");
        let transactions = response.into_transactions();

        assert_eq!(transactions.len(), 2, "transfers and refunds are skipped");

        assert_eq!(
            transactions[0],
            VenmoTransaction {
                id: "3001".to_string(),
                action: PaymentAction::Pay,
                amount: 42.5,
                note: "March rent share".to_string(),
                actor: "Alice W".to_string(),
                target: "bob-k".to_string(),
                status: "settled".to_string(),
                date_created: Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap(),
            }
        );

        let charge = &transactions[1];
        assert_eq!(charge.action, PaymentAction::Charge);
        assert_eq!(charge.note, "");
        assert_eq!(charge.actor, "22", "falls back to the user id");
        assert_eq!(charge.target, "carol@example.com");
    }

    #[test]
    fn test_me_response() {
        let response: MeResponse = serde_json::from_str(
            r#"{ "data": { "user": { "id": "11", "username": "alice-w", "display_name": "Alice W" }, "balance": "0.00" } }"#,
        )
        .expect("me payload should deserialize");

        assert_eq!(response.data.user.id, "11");
        assert_eq!(response.data.user.label(), "Alice W");
    }
}
