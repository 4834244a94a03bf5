//! OpenAPI Documentation
//!
//! Central OpenAPI document for the marketplace APIs.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer token scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token issued by POST /tokens"))
                        .build(),
                ),
            );
        }
    }
}

/// Platform API OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Royel Marketplace API",
        version = "1.0.0",
        description = "REST APIs for identities, listings, reviews, and payments"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development")
    ),
    tags(
        (name = "tokens", description = "Identity token issuance"),
        (name = "identities", description = "Identity registration and roles"),
        (name = "listings", description = "Marketplace listings"),
        (name = "reviews", description = "Listing reviews"),
        (name = "payments", description = "Payment intents and records")
    ),
    paths(
        super::tokens::issue_token,
        // Identities
        super::identities::get_identity,
        super::identities::get_admin_status,
        super::identities::register_identity,
        super::identities::promote_identity,
        super::identities::list_identities,
        super::identities::delete_identity,
        // Listings
        super::listings::list_listings,
        super::listings::list_listings_by_owner,
        super::listings::get_listing,
        super::listings::create_listing,
        super::listings::edit_listing,
        super::listings::approve_listing,
        super::listings::vote_listing,
        super::listings::delete_listing,
        // Reviews
        super::reviews::list_reviews_for_listing,
        super::reviews::create_review,
        // Payments
        super::payments::create_payment_intent,
        super::payments::list_payments,
        super::payments::list_payments_by_email,
        super::payments::record_payment,
    ),
    components(
        schemas(
            super::tokens::TokenResponse,
            super::identities::RegisterIdentityRequest,
            super::identities::IdentityResponse,
            super::identities::AdminStatusResponse,
            super::listings::CreateListingRequest,
            super::listings::EditListingRequest,
            super::listings::ListingResponse,
            super::reviews::CreateReviewRequest,
            super::reviews::ReviewResponse,
            super::payments::CreatePaymentIntentRequest,
            super::payments::PaymentIntentResponse,
            super::payments::RecordPaymentRequest,
            super::payments::PaymentResponse,
            // Common schemas
            super::common::ApiError,
            super::common::InsertResponse,
            super::common::UpdateResponse,
            super::common::DeleteResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct PlatformApiDoc;
