//! Collection Indexes
//!
//! Lookup indexes only. `users.email` is intentionally not unique: the
//! registration existence check is the only uniqueness guard.

use mongodb::{bson::{doc, Document}, Database, IndexModel};
use tracing::info;

use crate::error::Result;
use crate::repository::{
    MongoIdentityRepository, MongoListingRepository, MongoPaymentRepository, MongoReviewRepository,
};

pub async fn ensure_indexes(db: &Database) -> Result<()> {
    let specs = [
        (MongoIdentityRepository::COLLECTION, "email"),
        (MongoListingRepository::COLLECTION, "userEmail"),
        (MongoReviewRepository::COLLECTION, "listingId"),
        (MongoPaymentRepository::COLLECTION, "email"),
    ];

    for (collection, field) in specs {
        let model = IndexModel::builder().keys(doc! { field: 1 }).build();
        db.collection::<Document>(collection).create_index(model).await?;
        info!(collection, field, "Index ensured");
    }

    Ok(())
}
