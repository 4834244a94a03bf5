//! Stripe payment intent client

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{PlatformError, Result};
use crate::payment::{PaymentIntent, PaymentProvider};

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    /// API base URL, e.g. `https://api.stripe.com`
    pub api_base: String,
    pub request_timeout: Duration,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base: api_base.into(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: Option<String>,
}

pub struct StripeProvider {
    config: StripeConfig,
    client: reqwest::Client,
}

impl StripeProvider {
    pub fn new(config: StripeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PlatformError::configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.config.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<PaymentIntent> {
        let amount = amount_minor.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        debug!(amount_minor, currency, "Creating payment intent");

        let response = self.client
            .post(self.intents_url())
            .bearer_auth(&self.config.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Payment provider request failed: {}", e);
                PlatformError::upstream(format!("HTTP request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Payment provider returned {}: {}", status, body);
            return Err(PlatformError::upstream(format!("Provider returned {}", status)));
        }

        let intent: IntentResponse = response
            .json()
            .await
            .map_err(|e| PlatformError::upstream(format!("Failed to parse intent: {}", e)))?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| PlatformError::upstream("No client secret in intent response"))?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
        })
    }
}
