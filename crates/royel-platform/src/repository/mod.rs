//! Repository Layer
//!
//! Store adapter traits and their MongoDB implementations.
//! Every call is a single-document operation; nothing here spans documents.

pub mod identity;
pub mod listing;
pub mod review;
pub mod payment;
pub mod indexes;

pub use identity::{IdentityRepository, MongoIdentityRepository};
pub use listing::{ListingRepository, MongoListingRepository};
pub use review::{ReviewRepository, MongoReviewRepository};
pub use payment::{PaymentRepository, MongoPaymentRepository};
pub use indexes::ensure_indexes;

use mongodb::bson::{oid::ObjectId, Bson};

/// Outcome of a single-document update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    /// Set when an upsert created the document
    pub upserted_id: Option<String>,
}

impl UpdateOutcome {
    pub fn from_result(result: mongodb::results::UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.and_then(id_to_hex),
        }
    }
}

fn id_to_hex(id: Bson) -> Option<String> {
    match id {
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::String(s) => Some(s),
        _ => None,
    }
}

/// Parse a caller-supplied id into the store's native `ObjectId`.
/// Anything that is not 24 hex characters matches no record.
pub(crate) fn object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
