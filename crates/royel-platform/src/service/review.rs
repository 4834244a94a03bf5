//! Review Service

use std::sync::Arc;
use tracing::info;

use crate::domain::Review;
use crate::error::{PlatformError, Result};
use crate::repository::ReviewRepository;

#[derive(Debug, Clone, Default)]
pub struct NewReview {
    pub listing_id: String,
    pub author: String,
    pub content: String,
}

pub struct ReviewService {
    repo: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(repo: Arc<dyn ReviewRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_for_listing(&self, listing_id: &str) -> Result<Vec<Review>> {
        self.repo.find_by_listing(listing_id).await
    }

    /// Append-only. The target listing is not checked for existence.
    pub async fn create(&self, input: NewReview) -> Result<String> {
        if input.listing_id.trim().is_empty() {
            return Err(PlatformError::validation("listingId is required"));
        }

        let review = Review::new(input.listing_id, input.author, input.content);
        let id = review.id.clone();
        self.repo.insert(&review).await?;
        info!(id = %id, listing_id = %review.listing_id, "Review created");
        Ok(id)
    }
}
