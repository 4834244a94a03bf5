//! Listings API
//!
//! REST endpoints for marketplace listings.

use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::{Listing, ListingEdit};
use crate::error::PlatformError;
use crate::api::common::{DeleteResponse, InsertResponse, UpdateResponse};
use crate::api::middleware::{AdminAuthenticated, Authenticated};
use crate::service::{ListingService, NewListing};

/// Create listing request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    /// Declared owner email
    pub user_email: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub external_link: String,
    #[serde(default)]
    pub product_description: String,
    #[serde(default)]
    pub image: String,
}

/// Edit listing request. Omitted fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditListingRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub external_link: Option<String>,
    pub product_description: Option<String>,
    pub image: Option<String>,
}

impl From<EditListingRequest> for ListingEdit {
    fn from(r: EditListingRequest) -> Self {
        Self {
            name: r.name,
            category: r.category,
            external_link: r.external_link,
            product_description: r.product_description,
            image: r.image,
        }
    }
}

/// Listing response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_email: String,
    pub name: String,
    pub category: String,
    pub external_link: String,
    pub product_description: String,
    pub image: String,
    pub status: String,
    pub vote: i64,
    pub created_at: Option<String>,
}

impl From<Listing> for ListingResponse {
    fn from(l: Listing) -> Self {
        Self {
            id: l.id,
            user_email: l.user_email,
            name: l.name,
            category: l.category,
            external_link: l.external_link,
            product_description: l.product_description,
            image: l.image,
            status: l.status.as_str().to_string(),
            vote: l.vote,
            created_at: l.created_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Clone)]
pub struct ListingsState {
    pub listing_service: Arc<ListingService>,
}

/// List all listings
#[utoipa::path(
    get,
    path = "/listings",
    tag = "listings",
    responses((status = 200, description = "All listings", body = Vec<ListingResponse>))
)]
pub async fn list_listings(
    State(state): State<ListingsState>,
) -> Result<Json<Vec<ListingResponse>>, PlatformError> {
    let listings = state.listing_service.list_all().await?;
    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

/// Listings owned by an email
#[utoipa::path(
    get,
    path = "/listings/by-owner/{email}",
    tag = "listings",
    params(("email" = String, Path, description = "Owner email")),
    responses(
        (status = 200, description = "Owned listings", body = Vec<ListingResponse>),
        (status = 401, description = "Invalid or expired token"),
        (status = 403, description = "Missing token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_listings_by_owner(
    State(state): State<ListingsState>,
    _auth: Authenticated,
    Path(email): Path<String>,
) -> Result<Json<Vec<ListingResponse>>, PlatformError> {
    let listings = state.listing_service.list_by_owner(&email).await?;
    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

/// Get listing by ID
///
/// Returns `null` when the listing does not exist.
#[utoipa::path(
    get,
    path = "/listings/{id}",
    tag = "listings",
    params(("id" = String, Path, description = "Listing ID")),
    responses((status = 200, description = "Listing or null", body = ListingResponse))
)]
pub async fn get_listing(
    State(state): State<ListingsState>,
    Path(id): Path<String>,
) -> Result<Json<Option<ListingResponse>>, PlatformError> {
    let listing = state.listing_service.find(&id).await?;
    Ok(Json(listing.map(Into::into)))
}

/// Create a listing
///
/// Starts `pending` with zero votes.
#[utoipa::path(
    post,
    path = "/listings",
    tag = "listings",
    request_body = CreateListingRequest,
    responses(
        (status = 200, description = "Listing created", body = InsertResponse),
        (status = 403, description = "Missing token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_listing(
    State(state): State<ListingsState>,
    _auth: Authenticated,
    Json(req): Json<CreateListingRequest>,
) -> Result<Json<InsertResponse>, PlatformError> {
    let id = state
        .listing_service
        .create(NewListing {
            user_email: req.user_email,
            name: req.name,
            category: req.category,
            external_link: req.external_link,
            product_description: req.product_description,
            image: req.image,
        })
        .await?;

    Ok(Json(InsertResponse::inserted(id)))
}

/// Edit a listing
///
/// Upsert: creates the listing under this ID when it does not exist.
#[utoipa::path(
    patch,
    path = "/listings/{id}",
    tag = "listings",
    params(("id" = String, Path, description = "Listing ID")),
    request_body = EditListingRequest,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateResponse),
        (status = 403, description = "Missing token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_listing(
    State(state): State<ListingsState>,
    _auth: Authenticated,
    Path(id): Path<String>,
    Json(req): Json<EditListingRequest>,
) -> Result<Json<UpdateResponse>, PlatformError> {
    let outcome = state.listing_service.edit(&id, req.into()).await?;
    Ok(Json(outcome.into()))
}

/// Approve a listing
#[utoipa::path(
    patch,
    path = "/listings/{id}/approve",
    tag = "listings",
    params(("id" = String, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateResponse),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn approve_listing(
    State(state): State<ListingsState>,
    _auth: AdminAuthenticated,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>, PlatformError> {
    let outcome = state.listing_service.approve(&id).await?;
    Ok(Json(outcome.into()))
}

/// Vote for a listing
#[utoipa::path(
    patch,
    path = "/listings/{id}/vote",
    tag = "listings",
    params(("id" = String, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateResponse),
        (status = 403, description = "Missing token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn vote_listing(
    State(state): State<ListingsState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>, PlatformError> {
    let outcome = state.listing_service.vote(&id).await?;
    Ok(Json(outcome.into()))
}

/// Delete a listing
#[utoipa::path(
    delete,
    path = "/listings/{id}",
    tag = "listings",
    params(("id" = String, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Delete acknowledgement", body = DeleteResponse),
        (status = 403, description = "Missing token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_listing(
    State(state): State<ListingsState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, PlatformError> {
    let deleted = state.listing_service.delete(&id).await?;
    Ok(Json(DeleteResponse::new(deleted)))
}

/// Create listings router
pub fn listings_router(state: ListingsState) -> Router {
    Router::new()
        .route("/", get(list_listings).post(create_listing))
        .route("/by-owner/:email", get(list_listings_by_owner))
        .route("/:id", get(get_listing).patch(edit_listing).delete(delete_listing))
        .route("/:id/approve", patch(approve_listing))
        .route("/:id/vote", patch(vote_listing))
        .with_state(state)
}
