use axum::{Router, routing::get};

pub mod jobs;
pub mod system;

/// Router for the job endpoints. Mutating handlers check identity themselves.
pub fn router() -> Router {
    Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/jobs/:company_handle",
            get(jobs::get_job).patch(jobs::update_job).delete(jobs::remove_job),
        )
}
