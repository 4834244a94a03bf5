//! Authorization Guard Chain
//!
//! Two checks applied in a fixed order before a protected operation runs:
//! 1. `authenticate` - bearer token present and verifiable
//! 2. `require_admin` - the authenticated email maps to an `admin` identity
//!
//! Authentication never touches the store. The admin check reads the
//! identity store on every call so role changes apply on the next request.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::is_admin;
use crate::error::{PlatformError, Result};
use crate::repository::IdentityRepository;
use crate::service::auth::{extract_bearer_token, AccessTokenClaims, AuthService};

/// Verified identity attached to a request
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub email: String,
    pub claims: AccessTokenClaims,
}

impl AuthContext {
    pub fn from_claims(claims: AccessTokenClaims) -> Self {
        Self {
            email: claims.email.clone(),
            claims,
        }
    }

    pub fn is_self(&self, email: &str) -> bool {
        self.email == email
    }
}

pub struct AuthorizationService {
    auth_service: Arc<AuthService>,
    identity_repo: Arc<dyn IdentityRepository>,
}

impl AuthorizationService {
    pub fn new(auth_service: Arc<AuthService>, identity_repo: Arc<dyn IdentityRepository>) -> Self {
        Self {
            auth_service,
            identity_repo,
        }
    }

    /// Authenticate from the raw `Authorization` header value.
    ///
    /// Missing header is `Forbidden`; a present but unusable header or an
    /// unverifiable token is an authentication failure.
    pub fn authenticate(&self, header: Option<&str>) -> Result<AuthContext> {
        let header = header.ok_or_else(|| {
            debug!("Rejected request without Authorization header");
            PlatformError::forbidden("Missing Authorization header")
        })?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| PlatformError::unauthenticated("Invalid Authorization header format"))?;

        let claims = self.auth_service.verify_token(token).map_err(|e| {
            debug!(error = %e, "Token verification failed");
            PlatformError::from(e)
        })?;

        Ok(AuthContext::from_claims(claims))
    }

    /// Live admin lookup for an email. Absent identities are not admins.
    pub async fn is_admin(&self, email: &str) -> Result<bool> {
        let identity = self.identity_repo.find_by_email(email).await?;
        Ok(is_admin(identity.as_ref()))
    }

    /// Require the authenticated identity to hold the `admin` role
    pub async fn require_admin(&self, ctx: &AuthContext) -> Result<()> {
        if self.is_admin(&ctx.email).await? {
            Ok(())
        } else {
            warn!(email = %ctx.email, "Admin access denied");
            Err(PlatformError::forbidden("Admin role required"))
        }
    }
}

/// Stateless authorization checks
pub mod checks {
    use super::AuthContext;
    use crate::error::{PlatformError, Result};

    /// Require that a path-supplied email is the caller's own
    pub fn require_self(ctx: &AuthContext, email: &str) -> Result<()> {
        if ctx.is_self(email) {
            Ok(())
        } else {
            tracing::warn!(caller = %ctx.email, requested = %email, "Self-access check failed");
            Err(PlatformError::forbidden("Access to another identity denied"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, Role};
    use crate::repository::UpdateOutcome;
    use crate::service::auth::{AuthConfig, TokenRequest};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRepo {
        identity: Option<Identity>,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl IdentityRepository for CountingRepo {
        async fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.identity.clone().filter(|i| i.email == email))
        }
        async fn find_all(&self) -> Result<Vec<Identity>> {
            Ok(self.identity.clone().into_iter().collect())
        }
        async fn insert(&self, _identity: &Identity) -> Result<()> {
            Ok(())
        }
        async fn set_role(&self, _id: &str, _role: Role) -> Result<UpdateOutcome> {
            Ok(UpdateOutcome::default())
        }
        async fn delete(&self, _id: &str) -> Result<u64> {
            Ok(0)
        }
    }

    fn setup(identity: Option<Identity>) -> (AuthorizationService, Arc<AuthService>, Arc<CountingRepo>) {
        let auth = Arc::new(AuthService::new(AuthConfig::new("test_secret")));
        let repo = Arc::new(CountingRepo {
            identity,
            lookups: AtomicUsize::new(0),
        });
        (AuthorizationService::new(auth.clone(), repo.clone()), auth, repo)
    }

    fn bearer(auth: &AuthService, email: &str) -> String {
        format!("Bearer {}", auth.issue_token(TokenRequest::new(email)).unwrap())
    }

    #[test]
    fn test_missing_header_is_forbidden() {
        let (authz, _, repo) = setup(None);
        let err = authz.authenticate(None).unwrap_err();
        assert!(matches!(err, PlatformError::Forbidden { .. }));
        assert_eq!(repo.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_malformed_header_is_unauthenticated() {
        let (authz, _, _) = setup(None);
        let err = authz.authenticate(Some("Token abc")).unwrap_err();
        assert!(matches!(err, PlatformError::Unauthenticated { .. }));
    }

    #[test]
    fn test_valid_token_yields_context() {
        let (authz, auth, repo) = setup(None);
        let ctx = authz.authenticate(Some(&bearer(&auth, "a@x.com"))).unwrap();
        assert_eq!(ctx.email, "a@x.com");
        assert_eq!(repo.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_foreign_token_is_invalid() {
        let (authz, _, _) = setup(None);
        let other = AuthService::new(AuthConfig::new("other_secret"));
        let err = authz.authenticate(Some(&bearer(&other, "a@x.com"))).unwrap_err();
        assert!(matches!(err, PlatformError::InvalidToken { .. }));
    }

    #[tokio::test]
    async fn test_require_admin_allows_admin() {
        let mut admin = Identity::new("root@x.com");
        admin.role = Role::Admin;
        let (authz, auth, repo) = setup(Some(admin));

        let ctx = authz.authenticate(Some(&bearer(&auth, "root@x.com"))).unwrap();
        authz.require_admin(&ctx).await.unwrap();
        assert_eq!(repo.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_require_admin_denies_standard_and_absent() {
        let (authz, auth, _) = setup(Some(Identity::new("a@x.com")));

        let ctx = authz.authenticate(Some(&bearer(&auth, "a@x.com"))).unwrap();
        assert!(matches!(
            authz.require_admin(&ctx).await.unwrap_err(),
            PlatformError::Forbidden { .. }
        ));

        let ghost = authz.authenticate(Some(&bearer(&auth, "ghost@x.com"))).unwrap();
        assert!(matches!(
            authz.require_admin(&ghost).await.unwrap_err(),
            PlatformError::Forbidden { .. }
        ));
    }

    #[test]
    fn test_require_self() {
        let (authz, auth, _) = setup(None);
        let ctx = authz.authenticate(Some(&bearer(&auth, "a@x.com"))).unwrap();

        assert!(checks::require_self(&ctx, "a@x.com").is_ok());
        assert!(matches!(
            checks::require_self(&ctx, "b@x.com").unwrap_err(),
            PlatformError::Forbidden { .. }
        ));
    }
}
