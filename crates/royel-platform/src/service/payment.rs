//! Payment Service
//!
//! Intent creation through the provider bridge and storage of payment
//! records reported by the client. Provider callbacks are not verified.

use std::sync::Arc;
use tracing::info;

use crate::domain::PaymentRecord;
use crate::error::{PlatformError, Result};
use crate::payment::{to_minor_units, PaymentIntent, PaymentProvider};
use crate::repository::PaymentRepository;
use crate::service::authorization::{checks, AuthContext};

#[derive(Debug, Clone, Default)]
pub struct NewPayment {
    pub email: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub transaction_id: String,
}

pub struct PaymentService {
    repo: Arc<dyn PaymentRepository>,
    provider: Arc<dyn PaymentProvider>,
    currency: String,
}

impl PaymentService {
    pub fn new(
        repo: Arc<dyn PaymentRepository>,
        provider: Arc<dyn PaymentProvider>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            provider,
            currency: currency.into(),
        }
    }

    /// Create a provider intent for a major-unit price
    pub async fn create_intent(&self, price: f64, currency: Option<&str>) -> Result<PaymentIntent> {
        let amount = to_minor_units(price)?;
        let currency = currency.unwrap_or(&self.currency);
        let intent = self.provider.create_intent(amount, currency).await?;
        info!(intent_id = %intent.id, amount, currency, "Payment intent created");
        Ok(intent)
    }

    pub async fn record(&self, input: NewPayment) -> Result<String> {
        if input.email.trim().is_empty() {
            return Err(PlatformError::validation("email is required"));
        }

        let currency = input.currency.unwrap_or_else(|| self.currency.clone());
        let record = PaymentRecord::new(input.email, input.amount, currency, input.transaction_id);
        let id = record.id.clone();
        self.repo.insert(&record).await?;
        info!(id = %id, email = %record.email, "Payment recorded");
        Ok(id)
    }

    pub async fn list_all(&self) -> Result<Vec<PaymentRecord>> {
        self.repo.find_all().await
    }

    /// Payments for the caller's own email only
    pub async fn list_for(&self, ctx: &AuthContext, email: &str) -> Result<Vec<PaymentRecord>> {
        checks::require_self(ctx, email)?;
        self.repo.find_by_email(email).await
    }
}
