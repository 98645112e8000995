use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Map, Value, json};

use jobly_auth::{AuthContext, require_admin};
use jobly_core::{CompanyHandle, JobPatch, NewJob};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

type Caller = Option<Extension<AuthContext>>;

fn caller(ctx: &Caller) -> Option<&AuthContext> {
    ctx.as_ref().map(|Extension(c)| c)
}

fn parse_handle(raw: String) -> Result<CompanyHandle, axum::response::Response> {
    CompanyHandle::new(raw).map_err(errors::domain_error_to_response)
}

/// `POST /jobs` (admin): `{ title, salary?, equity?, companyHandle }` → 201 `{ job }`.
pub async fn create_job(
    Extension(services): Extension<Arc<AppServices>>,
    ctx: Caller,
    body: Result<Json<NewJob>, JsonRejection>,
) -> axum::response::Response {
    if let Err(e) = require_admin(caller(&ctx)) {
        return errors::authz_error_to_response(e);
    }

    let Json(new_job) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if let Err(e) = new_job.validate() {
        return errors::domain_error_to_response(e);
    }

    match services.jobs.create(&new_job).await {
        Ok(job) => (StatusCode::CREATED, Json(json!({ "job": job }))).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

/// `GET /jobs?title&minSalary&hasEquity` → `{ jobs: [...] }`.
pub async fn list_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::JobsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let result = match query.into_filter() {
        Ok(Some(filter)) => services.jobs.list_filtered(&filter).await,
        Ok(None) => services.jobs.list_all().await,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match result {
        Ok(jobs) => (StatusCode::OK, Json(json!({ "jobs": jobs }))).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

/// `GET /jobs/:company_handle` → `{ jobs: job }`.
pub async fn get_job(
    Extension(services): Extension<Arc<AppServices>>,
    Path(handle): Path<String>,
) -> axum::response::Response {
    let handle = match parse_handle(handle) {
        Ok(h) => h,
        Err(resp) => return resp,
    };

    match services.jobs.get_by_company_handle(&handle).await {
        Ok(job) => (StatusCode::OK, Json(json!({ "jobs": job }))).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

/// `PATCH /jobs/:company_handle` (admin): `{ salary?, equity? }` → `{ jobs: job }`.
pub async fn update_job(
    Extension(services): Extension<Arc<AppServices>>,
    ctx: Caller,
    Path(handle): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> axum::response::Response {
    if let Err(e) = require_admin(caller(&ctx)) {
        return errors::authz_error_to_response(e);
    }

    let handle = match parse_handle(handle) {
        Ok(h) => h,
        Err(resp) => return resp,
    };
    let Json(object) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let patch = match JobPatch::from_json_object(&object) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.jobs.update(&handle, &patch).await {
        Ok(job) => (StatusCode::OK, Json(json!({ "jobs": job }))).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}

/// `DELETE /jobs/:company_handle` (admin) → `{ deleted: handle }`.
pub async fn remove_job(
    Extension(services): Extension<Arc<AppServices>>,
    ctx: Caller,
    Path(handle): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_admin(caller(&ctx)) {
        return errors::authz_error_to_response(e);
    }

    let handle = match parse_handle(handle) {
        Ok(h) => h,
        Err(resp) => return resp,
    };

    match services.jobs.remove(&handle).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "deleted": handle }))).into_response(),
        Err(e) => errors::repository_error_to_response(e),
    }
}
