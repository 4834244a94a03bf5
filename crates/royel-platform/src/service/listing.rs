//! Listing Service
//!
//! Lifecycle rules for listings:
//! - created `pending` with zero votes by any authenticated identity
//! - edits are a single upsert keyed by id (field-level merge)
//! - `pending -> approved` only, applied unconditionally (idempotent)
//! - votes only through an atomic +1 increment

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{Listing, ListingEdit, ListingStatus};
use crate::error::{PlatformError, Result};
use crate::repository::{ListingRepository, UpdateOutcome};

/// Listing creation input. Status and votes are not caller-settable.
#[derive(Debug, Clone, Default)]
pub struct NewListing {
    /// Declared owner. Not checked against the caller.
    pub user_email: String,
    pub name: String,
    pub category: String,
    pub external_link: String,
    pub product_description: String,
    pub image: String,
}

pub struct ListingService {
    repo: Arc<dyn ListingRepository>,
}

impl ListingService {
    pub fn new(repo: Arc<dyn ListingRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Listing>> {
        self.repo.find_all().await
    }

    pub async fn list_by_owner(&self, email: &str) -> Result<Vec<Listing>> {
        self.repo.find_by_owner(email).await
    }

    pub async fn find(&self, id: &str) -> Result<Option<Listing>> {
        self.repo.find_by_id(id).await
    }

    pub async fn create(&self, input: NewListing) -> Result<String> {
        if input.name.trim().is_empty() {
            return Err(PlatformError::validation("name is required"));
        }

        let listing = Listing::new(input.user_email, input.name)
            .with_category(input.category)
            .with_external_link(input.external_link)
            .with_description(input.product_description)
            .with_image(input.image);

        let id = listing.id.clone();
        self.repo.insert(&listing).await?;
        info!(id = %id, owner = %listing.user_email, "Listing created");
        Ok(id)
    }

    pub async fn edit(&self, id: &str, edit: ListingEdit) -> Result<UpdateOutcome> {
        let outcome = self.repo.upsert_fields(id, &edit).await?;
        debug!(id, upserted = outcome.upserted_id.is_some(), "Listing edited");
        Ok(outcome)
    }

    pub async fn approve(&self, id: &str) -> Result<UpdateOutcome> {
        let outcome = self.repo.set_status(id, ListingStatus::Approved).await?;
        info!(id, matched = outcome.matched_count, "Listing approved");
        Ok(outcome)
    }

    pub async fn vote(&self, id: &str) -> Result<UpdateOutcome> {
        self.repo.increment_votes(id, 1).await
    }

    /// Not owner-checked: any authenticated caller may delete
    pub async fn delete(&self, id: &str) -> Result<u64> {
        let deleted = self.repo.delete(id).await?;
        info!(id, deleted, "Listing deleted");
        Ok(deleted)
    }
}
