//! Identities API
//!
//! REST endpoints for identity registration and administration.
//! Path segment `{identity}` is an email for reads and a record id for
//! mutations.

use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::Identity;
use crate::error::PlatformError;
use crate::api::common::{DeleteResponse, InsertResponse, UpdateResponse};
use crate::api::middleware::{AdminAuthenticated, Authenticated};
use crate::service::{IdentityService, NewIdentity, RegistrationOutcome};

/// Register identity request. Any submitted role is ignored.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterIdentityRequest {
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

/// Identity response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub role: String,
    pub created_at: Option<String>,
}

impl From<Identity> for IdentityResponse {
    fn from(i: Identity) -> Self {
        Self {
            id: i.id,
            email: i.email,
            name: i.name,
            photo_url: i.photo_url,
            role: i.role.as_str().to_string(),
            created_at: i.created_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

#[derive(Clone)]
pub struct IdentitiesState {
    pub identity_service: Arc<IdentityService>,
}

/// Get identity by email
///
/// Returns `null` when no identity has this email.
#[utoipa::path(
    get,
    path = "/identities/{email}",
    tag = "identities",
    params(("email" = String, Path, description = "Identity email")),
    responses((status = 200, description = "Identity or null", body = IdentityResponse))
)]
pub async fn get_identity(
    State(state): State<IdentitiesState>,
    Path(email): Path<String>,
) -> Result<Json<Option<IdentityResponse>>, PlatformError> {
    let identity = state.identity_service.find_by_email(&email).await?;
    Ok(Json(identity.map(Into::into)))
}

/// Admin flag for the caller's own identity
#[utoipa::path(
    get,
    path = "/identities/{email}/admin-status",
    tag = "identities",
    params(("email" = String, Path, description = "Identity email, must match the token")),
    responses(
        (status = 200, description = "Admin flag", body = AdminStatusResponse),
        (status = 401, description = "Invalid or expired token"),
        (status = 403, description = "Missing token or email mismatch")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_admin_status(
    State(state): State<IdentitiesState>,
    auth: Authenticated,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>, PlatformError> {
    let admin = state.identity_service.admin_status(&auth.0, &email).await?;
    Ok(Json(AdminStatusResponse { admin }))
}

/// Register an identity
///
/// Idempotent on email: an existing email reports "user already exists".
#[utoipa::path(
    post,
    path = "/identities",
    tag = "identities",
    request_body = RegisterIdentityRequest,
    responses((status = 200, description = "Registered or already exists", body = InsertResponse))
)]
pub async fn register_identity(
    State(state): State<IdentitiesState>,
    Json(req): Json<RegisterIdentityRequest>,
) -> Result<Json<InsertResponse>, PlatformError> {
    let outcome = state
        .identity_service
        .register(NewIdentity {
            email: req.email,
            name: req.name,
            photo_url: req.photo_url,
        })
        .await?;

    Ok(Json(match outcome {
        RegistrationOutcome::Created { id } => InsertResponse::inserted(id),
        RegistrationOutcome::AlreadyExists => InsertResponse::not_inserted("user already exists"),
    }))
}

/// Promote an identity to admin
#[utoipa::path(
    patch,
    path = "/identities/{id}/role",
    tag = "identities",
    params(("id" = String, Path, description = "Identity ID")),
    responses(
        (status = 200, description = "Role updated", body = UpdateResponse),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn promote_identity(
    State(state): State<IdentitiesState>,
    _auth: AdminAuthenticated,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>, PlatformError> {
    let outcome = state.identity_service.promote(&id).await?;
    Ok(Json(outcome.into()))
}

/// List all identities
#[utoipa::path(
    get,
    path = "/identities",
    tag = "identities",
    responses(
        (status = 200, description = "All identities", body = Vec<IdentityResponse>),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_identities(
    State(state): State<IdentitiesState>,
    _auth: AdminAuthenticated,
) -> Result<Json<Vec<IdentityResponse>>, PlatformError> {
    let identities = state.identity_service.list_all().await?;
    Ok(Json(identities.into_iter().map(Into::into).collect()))
}

/// Delete an identity
#[utoipa::path(
    delete,
    path = "/identities/{id}",
    tag = "identities",
    params(("id" = String, Path, description = "Identity ID")),
    responses(
        (status = 200, description = "Delete acknowledgement", body = DeleteResponse),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_identity(
    State(state): State<IdentitiesState>,
    _auth: AdminAuthenticated,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, PlatformError> {
    let deleted = state.identity_service.delete(&id).await?;
    Ok(Json(DeleteResponse::new(deleted)))
}

/// Create identities router
pub fn identities_router(state: IdentitiesState) -> Router {
    Router::new()
        .route("/", get(list_identities).post(register_identity))
        .route("/:identity", get(get_identity).delete(delete_identity))
        .route("/:identity/admin-status", get(get_admin_status))
        .route("/:identity/role", patch(promote_identity))
        .with_state(state)
}
