//! API Middleware
//!
//! Guard chain extractors for Axum. `Authenticated` verifies the bearer
//! token; `AdminAuthenticated` additionally requires the `admin` role.
//! Both reject before the handler body runs.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::PlatformError;
use crate::service::{AuthorizationService, AuthContext};

/// Shared guard state, installed as a request extension
#[derive(Clone)]
pub struct AppState {
    pub authz_service: Arc<AuthorizationService>,
}

fn app_state(parts: &Parts) -> Result<AppState, Response> {
    parts
        .extensions
        .get::<AppState>()
        .cloned()
        .ok_or_else(|| {
            PlatformError::Internal {
                message: "AppState not found".to_string(),
            }
            .into_response()
        })
}

/// Extractor for authenticated requests
pub struct Authenticated(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts)?;

        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                PlatformError::unauthenticated("Authorization header is not valid text").into_response()
            })?),
            None => None,
        };

        let context = app_state
            .authz_service
            .authenticate(header)
            .map_err(|e| e.into_response())?;

        // Verified identity for downstream layers
        parts.extensions.insert(context.clone());

        Ok(Authenticated(context))
    }
}

/// Extractor for requests that require an administrator
pub struct AdminAuthenticated(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminAuthenticated
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Authenticated(context) = Authenticated::from_request_parts(parts, state).await?;
        let app_state = app_state(parts)?;

        app_state
            .authz_service
            .require_admin(&context)
            .await
            .map_err(|e| e.into_response())?;

        Ok(AdminAuthenticated(context))
    }
}
