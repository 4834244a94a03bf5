//! API Layer
//!
//! REST endpoints for the marketplace, assembled into one router by
//! [`platform_router`].

pub mod common;
pub mod middleware;
pub mod openapi;

pub mod tokens;
pub mod identities;
pub mod listings;
pub mod reviews;
pub mod payments;

use axum::{routing::get, Extension, Json, Router};
use std::sync::Arc;

use crate::service::{
    AuthService, AuthorizationService, IdentityService, ListingService, PaymentService,
    ReviewService,
};

pub use common::*;
pub use middleware::{AdminAuthenticated, AppState, Authenticated};
pub use openapi::PlatformApiDoc;

pub use tokens::{TokensState, tokens_router};
pub use identities::{IdentitiesState, identities_router};
pub use listings::{ListingsState, listings_router};
pub use reviews::{ReviewsState, reviews_router};
pub use payments::{PaymentsState, payments_router, payment_intents_router};

/// Services backing the HTTP surface
#[derive(Clone)]
pub struct PlatformServices {
    pub auth_service: Arc<AuthService>,
    pub authz_service: Arc<AuthorizationService>,
    pub identity_service: Arc<IdentityService>,
    pub listing_service: Arc<ListingService>,
    pub review_service: Arc<ReviewService>,
    pub payment_service: Arc<PaymentService>,
}

/// Build the full application router.
///
/// The guard state is installed as an extension so every nested router's
/// extractors can reach it.
pub fn platform_router(services: PlatformServices) -> Router {
    let payments_state = PaymentsState {
        payment_service: services.payment_service.clone(),
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .nest("/tokens", tokens_router(TokensState {
            auth_service: services.auth_service.clone(),
        }))
        .nest("/identities", identities_router(IdentitiesState {
            identity_service: services.identity_service.clone(),
        }))
        .nest("/listings", listings_router(ListingsState {
            listing_service: services.listing_service.clone(),
        }))
        .nest("/reviews", reviews_router(ReviewsState {
            review_service: services.review_service.clone(),
        }))
        .nest("/payment-intents", payment_intents_router(payments_state.clone()))
        .nest("/payments", payments_router(payments_state))
        .layer(Extension(AppState {
            authz_service: services.authz_service,
        }))
}

async fn root_handler() -> &'static str {
    "Royel tech server is running"
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn ready_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "READY" }))
}
