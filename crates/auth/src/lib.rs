//! `jobly-auth` — identity and access checks (no HTTP, no storage).
//!
//! Token verification produces an [`AuthContext`]; the [`gate`] functions
//! decide what that context may do. Nothing here keeps process-wide state.

pub mod claims;
pub mod context;
pub mod gate;
pub mod jwt;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use context::AuthContext;
pub use gate::{AuthzError, is_admin, is_authenticated, require_admin};
pub use jwt::{Hs256JwtValidator, JwtValidator};
