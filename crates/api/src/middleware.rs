use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use jobly_auth::{AuthContext, JwtValidator};

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Attach an [`AuthContext`] when the request carries a valid bearer token.
///
/// Never rejects: a missing or invalid token leaves the request anonymous and
/// route handlers decide whether identity is needed.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer(req.headers()) {
        match state.jwt.validate(token, Utc::now()) {
            Ok(claims) => {
                req.extensions_mut().insert(AuthContext::from(claims));
            }
            Err(e) => tracing::debug!(error = %e, "ignoring invalid bearer token"),
        }
    }

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
