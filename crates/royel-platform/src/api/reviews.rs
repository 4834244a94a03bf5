//! Reviews API

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::Review;
use crate::error::PlatformError;
use crate::api::common::InsertResponse;
use crate::api::middleware::Authenticated;
use crate::service::{NewReview, ReviewService};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub listing_id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub listing_id: String,
    pub author: String,
    pub content: String,
    pub created_at: Option<String>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            listing_id: r.listing_id,
            author: r.author,
            content: r.content,
            created_at: r.created_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Clone)]
pub struct ReviewsState {
    pub review_service: Arc<ReviewService>,
}

/// Reviews for a listing
#[utoipa::path(
    get,
    path = "/reviews/by-listing/{id}",
    tag = "reviews",
    params(("id" = String, Path, description = "Listing ID")),
    responses((status = 200, description = "Reviews", body = Vec<ReviewResponse>))
)]
pub async fn list_reviews_for_listing(
    State(state): State<ReviewsState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ReviewResponse>>, PlatformError> {
    let reviews = state.review_service.list_for_listing(&id).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Create a review
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review created", body = InsertResponse),
        (status = 403, description = "Missing token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    State(state): State<ReviewsState>,
    _auth: Authenticated,
    Json(req): Json<CreateReviewRequest>,
) -> Result<Json<InsertResponse>, PlatformError> {
    let id = state
        .review_service
        .create(NewReview {
            listing_id: req.listing_id,
            author: req.author,
            content: req.content,
        })
        .await?;
    Ok(Json(InsertResponse::inserted(id)))
}

pub fn reviews_router(state: ReviewsState) -> Router {
    Router::new()
        .route("/", post(create_review))
        .route("/by-listing/:id", get(list_reviews_for_listing))
        .with_state(state)
}
