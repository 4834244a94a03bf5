//! Payment Record Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed payment as reported by the client after provider confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// ObjectId hex; stored as a native ObjectId
    #[serde(rename = "_id", with = "bson::serde_helpers::hex_string_as_object_id")]
    pub id: String,

    /// Payer email
    pub email: String,

    /// Amount in major currency units, as reported
    pub amount: f64,

    pub currency: String,

    /// Provider reference (payment intent or transaction id)
    pub transaction_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    pub fn new(
        email: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        transaction_id: impl Into<String>,
    ) -> Self {
        Self {
            id: crate::domain::generate_id(),
            email: email.into(),
            amount,
            currency: currency.into(),
            transaction_id: transaction_id.into(),
            created_at: Some(Utc::now()),
        }
    }
}
