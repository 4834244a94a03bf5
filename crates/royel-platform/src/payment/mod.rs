//! Payment Intent Bridge
//!
//! Converts a decimal major-unit price into integer minor units and asks the
//! payment provider for an intent. No retries: provider failures surface as
//! `PlatformError::Upstream`.

pub mod stripe;

use async_trait::async_trait;

use crate::error::{PlatformError, Result};

pub use stripe::{StripeConfig, StripeProvider};

/// Provider-side payment intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an intent for a positive amount in minor units
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<PaymentIntent>;
}

/// Convert a major-unit price to minor units by truncating `price * 100`.
///
/// Truncation is binary floating point, so some inputs lose a cent
/// (`19.999 -> 1999`, and `19.99 -> 1998` as `19.99 * 100` is just below 1999).
pub fn to_minor_units(price: f64) -> Result<i64> {
    let minor = (price * 100.0).trunc();
    if !minor.is_finite() || minor < 1.0 || minor > i64::MAX as f64 {
        return Err(PlatformError::upstream(format!("invalid amount: {}", price)));
    }
    Ok(minor as i64)
}
