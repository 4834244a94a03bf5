//! Service Layer
//!
//! Token issuance, the authorization guard chain, and the per-resource
//! rules enforced on identities, listings, reviews and payments.

pub mod auth;
pub mod authorization;
pub mod identity;
pub mod listing;
pub mod review;
pub mod payment;

pub use auth::{AuthService, AuthConfig, AccessTokenClaims, TokenError, TokenRequest, extract_bearer_token};
pub use authorization::{AuthorizationService, AuthContext, checks};
pub use identity::{IdentityService, NewIdentity, RegistrationOutcome};
pub use listing::{ListingService, NewListing};
pub use review::{ReviewService, NewReview};
pub use payment::{PaymentService, NewPayment};
