//! Payment Repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};

use crate::domain::PaymentRecord;
use crate::error::Result;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<PaymentRecord>>;
    async fn find_by_email(&self, email: &str) -> Result<Vec<PaymentRecord>>;
    async fn insert(&self, payment: &PaymentRecord) -> Result<()>;
}

pub struct MongoPaymentRepository {
    collection: Collection<PaymentRecord>,
}

impl MongoPaymentRepository {
    pub const COLLECTION: &'static str = "payments";

    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(Self::COLLECTION),
        }
    }
}

#[async_trait]
impl PaymentRepository for MongoPaymentRepository {
    async fn find_all(&self) -> Result<Vec<PaymentRecord>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<PaymentRecord>> {
        let cursor = self.collection.find(doc! { "email": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, payment: &PaymentRecord) -> Result<()> {
        self.collection.insert_one(payment).await?;
        Ok(())
    }
}
