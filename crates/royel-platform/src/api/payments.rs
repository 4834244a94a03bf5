//! Payments API
//!
//! Intent creation and payment recording accept unauthenticated callers;
//! listing by email is restricted to the caller's own payments.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::PaymentRecord;
use crate::error::PlatformError;
use crate::api::common::InsertResponse;
use crate::api::middleware::Authenticated;
use crate::service::{NewPayment, PaymentService};

/// Payment intent request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    /// Price in major currency units
    pub price: f64,
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Record payment request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub email: String,
    /// Amount in major currency units
    pub amount: f64,
    pub currency: Option<String>,
    /// Provider reference
    #[serde(default)]
    pub transaction_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub amount: f64,
    pub currency: String,
    pub transaction_id: String,
    pub created_at: Option<String>,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(p: PaymentRecord) -> Self {
        Self {
            id: p.id,
            email: p.email,
            amount: p.amount,
            currency: p.currency,
            transaction_id: p.transaction_id,
            created_at: p.created_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Clone)]
pub struct PaymentsState {
    pub payment_service: Arc<PaymentService>,
}

/// Create a payment intent
///
/// The price is truncated to minor units before submission.
#[utoipa::path(
    post,
    path = "/payment-intents",
    tag = "payments",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 200, description = "Intent created", body = PaymentIntentResponse),
        (status = 502, description = "Payment provider failure")
    )
)]
pub async fn create_payment_intent(
    State(state): State<PaymentsState>,
    Json(req): Json<CreatePaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, PlatformError> {
    let intent = state
        .payment_service
        .create_intent(req.price, req.currency.as_deref())
        .await?;
    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// List all payments
#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    responses((status = 200, description = "All payments", body = Vec<PaymentResponse>))
)]
pub async fn list_payments(
    State(state): State<PaymentsState>,
) -> Result<Json<Vec<PaymentResponse>>, PlatformError> {
    let payments = state.payment_service.list_all().await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// Payments for the caller's own email
#[utoipa::path(
    get,
    path = "/payments/by-email/{email}",
    tag = "payments",
    params(("email" = String, Path, description = "Payer email, must match the token")),
    responses(
        (status = 200, description = "Payments", body = Vec<PaymentResponse>),
        (status = 401, description = "Invalid or expired token"),
        (status = 403, description = "Missing token or email mismatch")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_payments_by_email(
    State(state): State<PaymentsState>,
    auth: Authenticated,
    Path(email): Path<String>,
) -> Result<Json<Vec<PaymentResponse>>, PlatformError> {
    let payments = state.payment_service.list_for(&auth.0, &email).await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// Record a completed payment
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = RecordPaymentRequest,
    responses((status = 200, description = "Payment recorded", body = InsertResponse))
)]
pub async fn record_payment(
    State(state): State<PaymentsState>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<Json<InsertResponse>, PlatformError> {
    let id = state
        .payment_service
        .record(NewPayment {
            email: req.email,
            amount: req.amount,
            currency: req.currency,
            transaction_id: req.transaction_id,
        })
        .await?;
    Ok(Json(InsertResponse::inserted(id)))
}

pub fn payments_router(state: PaymentsState) -> Router {
    Router::new()
        .route("/", get(list_payments).post(record_payment))
        .route("/by-email/:email", get(list_payments_by_email))
        .with_state(state)
}

pub fn payment_intents_router(state: PaymentsState) -> Router {
    Router::new()
        .route("/", post(create_payment_intent))
        .with_state(state)
}
