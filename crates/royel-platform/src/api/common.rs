//! Common API types and utilities

use serde::Serialize;
use utoipa::ToSchema;

use crate::repository::UpdateOutcome;

/// Standard API error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Insert acknowledgement
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// `null` when nothing was inserted
    pub inserted_id: Option<String>,
}

impl InsertResponse {
    pub fn inserted(id: impl Into<String>) -> Self {
        Self {
            message: None,
            inserted_id: Some(id.into()),
        }
    }

    pub fn not_inserted(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            inserted_id: None,
        }
    }
}

/// Update acknowledgement
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
}

impl From<UpdateOutcome> for UpdateResponse {
    fn from(o: UpdateOutcome) -> Self {
        Self {
            matched_count: o.matched_count,
            modified_count: o.modified_count,
            upserted_id: o.upserted_id,
        }
    }
}

/// Delete acknowledgement
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

impl DeleteResponse {
    pub fn new(deleted_count: u64) -> Self {
        Self { deleted_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_inserted_serializes_null_id() {
        let json = serde_json::to_value(InsertResponse::not_inserted("user already exists")).unwrap();
        assert_eq!(json["message"], "user already exists");
        assert!(json["insertedId"].is_null());
    }

    #[test]
    fn test_inserted_omits_message() {
        let json = serde_json::to_value(InsertResponse::inserted("abc")).unwrap();
        assert_eq!(json["insertedId"], "abc");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_update_response_from_outcome() {
        let response: UpdateResponse = UpdateOutcome {
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some("abc".to_string()),
        }
        .into();
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["matchedCount"], 0);
        assert_eq!(json["upsertedId"], "abc");
    }
}
