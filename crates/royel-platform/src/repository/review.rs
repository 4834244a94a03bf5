//! Review Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};

use crate::domain::Review;
use crate::error::Result;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_listing(&self, listing_id: &str) -> Result<Vec<Review>>;
    async fn insert(&self, review: &Review) -> Result<()>;
}

pub struct MongoReviewRepository {
    collection: Collection<Review>,
}

impl MongoReviewRepository {
    pub const COLLECTION: &'static str = "reviews";

    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(Self::COLLECTION),
        }
    }
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    async fn find_by_listing(&self, listing_id: &str) -> Result<Vec<Review>> {
        let cursor = self.collection.find(doc! { "listingId": listing_id }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, review: &Review) -> Result<()> {
        self.collection.insert_one(review).await?;
        Ok(())
    }
}
