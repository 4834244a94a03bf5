//! Review Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A review of a listing. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// ObjectId hex; stored as a native ObjectId
    #[serde(rename = "_id", with = "bson::serde_helpers::hex_string_as_object_id")]
    pub id: String,

    /// Target listing identifier
    pub listing_id: String,

    pub author: String,

    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn new(
        listing_id: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: crate::domain::generate_id(),
            listing_id: listing_id.into(),
            author: author.into(),
            content: content.into(),
            created_at: Some(Utc::now()),
        }
    }
}
