use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use jobly_auth::AuthzError;
use jobly_core::DomainError;
use jobly_infra::{RepositoryError, StoreError};

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::EmptyUpdate => json_error(StatusCode::BAD_REQUEST, "bad_request", "No data"),
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store failure");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        "internal server error",
    )
}

pub fn repository_error_to_response(err: RepositoryError) -> axum::response::Response {
    match err {
        RepositoryError::Domain(e) => domain_error_to_response(e),
        RepositoryError::Store(e) => store_error_to_response(e),
    }
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    let code = match err {
        AuthzError::Unauthenticated => "unauthenticated",
        AuthzError::Unauthorized => "unauthorized",
    };
    json_error(StatusCode::UNAUTHORIZED, code, "Unauthorized")
}

/// Malformed bodies are a caller error, whatever stage of extraction failed.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "bad_request", rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "bad_request", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
