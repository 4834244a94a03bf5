//! Domain Models
//!
//! Marketplace entities as stored in the document store.
//! All entities use store-native ObjectId hex strings as `_id`.

pub mod identity;
pub mod listing;
pub mod review;
pub mod payment;

pub use identity::*;
pub use listing::*;
pub use review::*;
pub use payment::*;

/// Generate a new opaque record identifier
pub fn generate_id() -> String {
    bson::oid::ObjectId::new().to_hex()
}
