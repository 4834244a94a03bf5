//! Token API
//!
//! - POST /tokens - issue a signed identity token from submitted claims

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::PlatformError;
use crate::service::{AuthService, TokenRequest};

/// Token response
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Clone)]
pub struct TokensState {
    pub auth_service: Arc<AuthService>,
}

/// Issue a token
///
/// Signs the submitted claim set (must include `email`) with a one hour expiry.
#[utoipa::path(
    post,
    path = "/tokens",
    tag = "tokens",
    request_body = Object,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing email claim")
    )
)]
pub async fn issue_token(
    State(state): State<TokensState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, PlatformError> {
    let token = state.auth_service.issue_token(req)?;
    Ok(Json(TokenResponse { token }))
}

pub fn tokens_router(state: TokensState) -> Router {
    Router::new()
        .route("/", post(issue_token))
        .with_state(state)
}
