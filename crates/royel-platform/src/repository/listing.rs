//! Listing Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Collection, Database, bson::{doc, Document}};

use crate::domain::{Listing, ListingEdit, ListingStatus};
use crate::error::{PlatformError, Result};
use crate::repository::{object_id, UpdateOutcome};

#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Listing>>;
    async fn find_by_owner(&self, email: &str) -> Result<Vec<Listing>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>>;
    async fn insert(&self, listing: &Listing) -> Result<()>;

    /// Field-level merge keyed by id; creates the listing when absent
    async fn upsert_fields(&self, id: &str, edit: &ListingEdit) -> Result<UpdateOutcome>;

    async fn set_status(&self, id: &str, status: ListingStatus) -> Result<UpdateOutcome>;

    /// Atomic store-level increment of the vote count
    async fn increment_votes(&self, id: &str, by: i64) -> Result<UpdateOutcome>;

    async fn delete(&self, id: &str) -> Result<u64>;
}

pub struct MongoListingRepository {
    collection: Collection<Listing>,
}

impl MongoListingRepository {
    pub const COLLECTION: &'static str = "product";

    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(Self::COLLECTION),
        }
    }
}

/// Update document for an edit-upsert.
/// `$setOnInsert` seeds lifecycle defaults only when the upsert creates the document.
fn upsert_update(edit: &ListingEdit) -> Document {
    let mut set = Document::new();
    for (field, value) in edit.fields() {
        set.insert(field, value);
    }

    let mut update = doc! {
        "$setOnInsert": {
            "status": ListingStatus::Pending.as_str(),
            "vote": 0_i64,
        }
    };
    if !set.is_empty() {
        update.insert("$set", set);
    }
    update
}

#[async_trait]
impl ListingRepository for MongoListingRepository {
    async fn find_all(&self) -> Result<Vec<Listing>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_owner(&self, email: &str) -> Result<Vec<Listing>> {
        let cursor = self.collection.find(doc! { "userEmail": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };
        Ok(self.collection.find_one(doc! { "_id": oid }).await?)
    }

    async fn insert(&self, listing: &Listing) -> Result<()> {
        self.collection.insert_one(listing).await?;
        Ok(())
    }

    async fn upsert_fields(&self, id: &str, edit: &ListingEdit) -> Result<UpdateOutcome> {
        // Upserts key new documents by ObjectId
        let oid = object_id(id)
            .ok_or_else(|| PlatformError::validation(format!("invalid listing id: {}", id)))?;
        let result = self.collection
            .update_one(doc! { "_id": oid }, upsert_update(edit))
            .upsert(true)
            .await?;
        Ok(UpdateOutcome::from_result(result))
    }

    async fn set_status(&self, id: &str, status: ListingStatus) -> Result<UpdateOutcome> {
        let Some(oid) = object_id(id) else {
            return Ok(UpdateOutcome::default());
        };
        let result = self.collection
            .update_one(doc! { "_id": oid }, doc! { "$set": { "status": status.as_str() } })
            .await?;
        Ok(UpdateOutcome::from_result(result))
    }

    async fn increment_votes(&self, id: &str, by: i64) -> Result<UpdateOutcome> {
        let Some(oid) = object_id(id) else {
            return Ok(UpdateOutcome::default());
        };
        let result = self.collection
            .update_one(doc! { "_id": oid }, doc! { "$inc": { "vote": by } })
            .await?;
        Ok(UpdateOutcome::from_result(result))
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let Some(oid) = object_id(id) else {
            return Ok(0);
        };
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count)
    }
}
