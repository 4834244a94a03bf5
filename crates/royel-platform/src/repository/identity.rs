//! Identity Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};

use crate::domain::{Identity, Role};
use crate::error::Result;
use crate::repository::{object_id, UpdateOutcome};

#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>>;
    async fn find_all(&self) -> Result<Vec<Identity>>;
    async fn insert(&self, identity: &Identity) -> Result<()>;
    async fn set_role(&self, id: &str, role: Role) -> Result<UpdateOutcome>;
    async fn delete(&self, id: &str) -> Result<u64>;
}

pub struct MongoIdentityRepository {
    collection: Collection<Identity>,
}

impl MongoIdentityRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(Self::COLLECTION),
        }
    }
}

#[async_trait]
impl IdentityRepository for MongoIdentityRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_all(&self) -> Result<Vec<Identity>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, identity: &Identity) -> Result<()> {
        self.collection.insert_one(identity).await?;
        Ok(())
    }

    async fn set_role(&self, id: &str, role: Role) -> Result<UpdateOutcome> {
        let Some(oid) = object_id(id) else {
            return Ok(UpdateOutcome::default());
        };
        let result = self.collection
            .update_one(doc! { "_id": oid }, doc! { "$set": { "role": role.as_str() } })
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
