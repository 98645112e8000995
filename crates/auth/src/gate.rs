//! Access gate: pure predicates over the caller's [`AuthContext`].
//!
//! - No IO
//! - No panics
//! - No ambient state: the context is always an argument

use thiserror::Error;

use crate::context::AuthContext;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// No verified identity accompanied the request.
    #[error("authentication required")]
    Unauthenticated,

    /// The caller is known but lacks the admin role.
    #[error("Unauthorized")]
    Unauthorized,
}

/// True iff the caller was verified by the identity layer.
pub fn is_authenticated(ctx: Option<&AuthContext>) -> bool {
    ctx.is_some()
}

/// True iff the caller is verified and flagged as admin.
pub fn is_admin(ctx: Option<&AuthContext>) -> bool {
    ctx.is_some_and(AuthContext::is_admin)
}

/// Gate for state-changing operations.
///
/// Callers must check this before touching storage so a denied request has no
/// side effects.
pub fn require_admin(ctx: Option<&AuthContext>) -> Result<&AuthContext, AuthzError> {
    let Some(ctx) = ctx else {
        tracing::warn!("mutation denied: anonymous caller");
        return Err(AuthzError::Unauthenticated);
    };
    if !ctx.is_admin() {
        tracing::warn!(username = %ctx.username(), "mutation denied: admin role required");
        return Err(AuthzError::Unauthorized);
    }
    Ok(ctx)
}
