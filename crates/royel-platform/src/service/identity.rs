//! Identity Service

use std::sync::Arc;
use tracing::info;

use crate::domain::{is_admin, Identity, Role};
use crate::error::{PlatformError, Result};
use crate::repository::{IdentityRepository, UpdateOutcome};
use crate::service::authorization::{checks, AuthContext};

/// Registration input. A role is never accepted from the caller.
#[derive(Debug, Clone, Default)]
pub struct NewIdentity {
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created { id: String },
    AlreadyExists,
}

pub struct IdentityService {
    repo: Arc<dyn IdentityRepository>,
}

impl IdentityService {
    pub fn new(repo: Arc<dyn IdentityRepository>) -> Self {
        Self { repo }
    }

    /// Idempotent on email.
    ///
    /// Check-then-insert: two concurrent registrations of the same email can
    /// both pass the check. Accepted at this scale.
    pub async fn register(&self, input: NewIdentity) -> Result<RegistrationOutcome> {
        if input.email.trim().is_empty() {
            return Err(PlatformError::validation("email is required"));
        }

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Ok(RegistrationOutcome::AlreadyExists);
        }

        let mut identity = Identity::new(input.email);
        if let Some(name) = input.name {
            identity = identity.with_name(name);
        }
        if let Some(photo_url) = input.photo_url {
            identity = identity.with_photo_url(photo_url);
        }

        let id = identity.id.clone();
        self.repo.insert(&identity).await?;
        info!(email = %identity.email, id = %id, "Identity registered");

        Ok(RegistrationOutcome::Created { id })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
        self.repo.find_by_email(email).await
    }

    /// Admin flag for the caller's own identity
    pub async fn admin_status(&self, ctx: &AuthContext, email: &str) -> Result<bool> {
        checks::require_self(ctx, email)?;
        let identity = self.repo.find_by_email(email).await?;
        Ok(is_admin(identity.as_ref()))
    }

    /// Promote to admin. Callers must already have passed the admin check.
    pub async fn promote(&self, id: &str) -> Result<UpdateOutcome> {
        let outcome = self.repo.set_role(id, Role::Admin).await?;
        info!(id, matched = outcome.matched_count, "Identity promoted to admin");
        Ok(outcome)
    }

    pub async fn list_all(&self) -> Result<Vec<Identity>> {
        self.repo.find_all().await
    }

    pub async fn delete(&self, id: &str) -> Result<u64> {
        let deleted = self.repo.delete(id).await?;
        info!(id, deleted, "Identity deleted");
        Ok(deleted)
    }
}
