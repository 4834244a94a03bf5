//! Identity Entity
//!
//! A registered user keyed by email, carrying a role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity role
///
/// Any stored value other than `admin` (including a missing field) reads
/// back as `Standard`, so unknown roles never grant elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    Standard,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// ObjectId hex; stored as a native ObjectId
    #[serde(rename = "_id", with = "bson::serde_helpers::hex_string_as_object_id")]
    pub id: String,

    /// Unique key
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    #[serde(default)]
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// New identity with the default `standard` role
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: crate::domain::generate_id(),
            email: email.into(),
            name: None,
            photo_url: None,
            role: Role::Standard,
            created_at: Some(Utc::now()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Admin decision over a possibly-absent identity record.
/// Absence is a non-admin.
pub fn is_admin(identity: Option<&Identity>) -> bool {
    match identity {
        Some(identity) => identity.is_admin(),
        None => false,
    }
}
