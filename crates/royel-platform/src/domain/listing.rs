//! Listing Entity
//!
//! A marketplace product with an approval and voting lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Approval status. Only `pending -> approved` is defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Pending,
    Approved,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Approved => "approved",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// ObjectId hex; stored as a native ObjectId
    #[serde(rename = "_id", with = "bson::serde_helpers::hex_string_as_object_id")]
    pub id: String,

    /// Email of the identity that submitted the listing
    #[serde(default)]
    pub user_email: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub external_link: String,

    #[serde(default)]
    pub product_description: String,

    /// Image reference (URL)
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub status: ListingStatus,

    /// Only ever changed through an atomic increment
    #[serde(default)]
    pub vote: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    pub fn new(user_email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: crate::domain::generate_id(),
            user_email: user_email.into(),
            name: name.into(),
            category: String::new(),
            external_link: String::new(),
            product_description: String::new(),
            image: String::new(),
            status: ListingStatus::Pending,
            vote: 0,
            created_at: Some(Utc::now()),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_external_link(mut self, external_link: impl Into<String>) -> Self {
        self.external_link = external_link.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.product_description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn is_approved(&self) -> bool {
        self.status == ListingStatus::Approved
    }

    /// Apply an edit in place; fields left `None` are untouched
    pub fn apply_edit(&mut self, edit: &ListingEdit) {
        if let Some(ref name) = edit.name {
            self.name = name.clone();
        }
        if let Some(ref category) = edit.category {
            self.category = category.clone();
        }
        if let Some(ref external_link) = edit.external_link {
            self.external_link = external_link.clone();
        }
        if let Some(ref description) = edit.product_description {
            self.product_description = description.clone();
        }
        if let Some(ref image) = edit.image {
            self.image = image.clone();
        }
    }
}

/// Editable listing fields for upsert-style edits.
///
/// Owner, status and vote count are deliberately absent: they change only
/// through creation, approval and voting respectively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingEdit {
    pub name: Option<String>,
    pub category: Option<String>,
    pub external_link: Option<String>,
    pub product_description: Option<String>,
    pub image: Option<String>,
}

impl ListingEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.external_link.is_none()
            && self.product_description.is_none()
            && self.image.is_none()
    }

    /// Set fields as (stored field name, value) pairs
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("category", &self.category),
            ("externalLink", &self.external_link),
            ("productDescription", &self.product_description),
            ("image", &self.image),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}
