use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use jobly_auth::JwtClaims;
use jobly_core::{CompanyHandle, Equity, Job, Salary};
use jobly_infra::StoreError;
use jobly_infra::testing::ScriptedExecutor;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    executor: Arc<ScriptedExecutor>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, with a scripted store and an ephemeral port.
        let executor = Arc::new(ScriptedExecutor::new());
        let app = jobly_api::app::build_app(JWT_SECRET.to_string(), executor.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            executor,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(secret: &str, username: &str, is_admin: bool) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        username: username.to_string(),
        is_admin,
        iat: Some(now.timestamp()),
        exp: Some((now + ChronoDuration::minutes(10)).timestamp()),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn admin_token() -> String {
    mint_jwt(JWT_SECRET, "admin", true)
}

fn user_token() -> String {
    mint_jwt(JWT_SECRET, "u1", false)
}

fn job(title: &str, salary: Option<i64>, equity: Option<&str>, handle: &str) -> Job {
    Job {
        title: title.to_string(),
        salary: salary.map(|s| Salary::new(s).unwrap()),
        equity: equity.map(|e| Equity::parse(e).unwrap()),
        company_handle: CompanyHandle::new(handle).unwrap(),
    }
}

#[tokio::test]
async fn health_needs_no_identity() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_can_create_a_job() {
    let srv = TestServer::spawn().await;
    srv.executor
        .push_jobs([job("new", Some(50_000), Some("0.015"), "c1")]);

    let res = reqwest::Client::new()
        .post(srv.url("/jobs"))
        .bearer_auth(admin_token())
        .json(&json!({ "title": "new", "salary": 50000, "equity": "0.015", "companyHandle": "c1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "job": { "title": "new", "salary": 50000, "equity": "0.015", "companyHandle": "c1" } })
    );

    let statements = srv.executor.statements();
    assert_eq!(statements.len(), 1);
    assert!(statements[0].sql.starts_with("INSERT INTO jobs"));
}

#[tokio::test]
async fn non_admin_and_anonymous_mutations_never_reach_the_store() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let body = json!({ "title": "new", "companyHandle": "c1" });

    for token in [Some(user_token()), None, Some(mint_jwt("wrong-secret", "admin", true))] {
        let with_auth = |rb: reqwest::RequestBuilder| match &token {
            Some(t) => rb.bearer_auth(t),
            None => rb,
        };

        let create = with_auth(client.post(srv.url("/jobs")).json(&body)).send().await.unwrap();
        let patch = with_auth(client.patch(srv.url("/jobs/c1")).json(&json!({ "salary": 1 })))
            .send()
            .await
            .unwrap();
        let delete = with_auth(client.delete(srv.url("/jobs/c1"))).send().await.unwrap();

        for res in [create, patch, delete] {
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            let err: Value = res.json().await.unwrap();
            assert_eq!(err["message"], "Unauthorized");
        }
    }

    assert!(srv.executor.statements().is_empty());
}

#[tokio::test]
async fn create_rejects_bad_shapes_with_400() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let bad_bodies = [
        json!({ "title": "new", "salary": 1 }),
        json!({ "title": "", "companyHandle": "c1" }),
        json!({ "title": "new", "equity": 0.5, "companyHandle": "c1" }),
        json!({ "title": "new", "equity": "1.5", "companyHandle": "c1" }),
        json!({ "title": "new", "salary": -1, "companyHandle": "c1" }),
        json!({ "title": "new", "companyHandle": "c1", "bogus": true }),
    ];

    for body in bad_bodies {
        let res = client
            .post(srv.url("/jobs"))
            .bearer_auth(admin_token())
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {body}");
    }

    assert!(srv.executor.statements().is_empty());
}

#[tokio::test]
async fn create_for_unknown_company_is_a_server_error() {
    let srv = TestServer::spawn().await;
    srv.executor
        .push_error(StoreError::ForeignKeyViolation("jobs_company_handle_fkey".into()));

    let res = reqwest::Client::new()
        .post(srv.url("/jobs"))
        .bearer_auth(admin_token())
        .json(&json!({ "title": "new", "companyHandle": "nope" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: Value = res.json().await.unwrap();
    assert_eq!(err["error"], "store_error");
}

#[tokio::test]
async fn listing_without_filters_reads_everything_sorted() {
    let srv = TestServer::spawn().await;
    srv.executor.push_jobs([
        job("job1", Some(100_001), Some("0"), "c1"),
        job("job2", None, None, "c2"),
    ]);

    let res = reqwest::get(srv.url("/jobs?title=&minSalary=")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["jobs"].as_array().unwrap().len(), 2);
    assert_eq!(body["jobs"][1]["salary"], Value::Null);

    let statements = srv.executor.statements();
    assert_eq!(statements.len(), 1);
    assert!(statements[0].sql.ends_with("ORDER BY title"));
    assert!(statements[0].params.is_empty());
}

#[tokio::test]
async fn listing_with_filters_uses_one_parameterized_statement() {
    let srv = TestServer::spawn().await;
    srv.executor.push_jobs([job("job3", Some(100_003), Some("0.030"), "c3")]);

    let res = reqwest::get(srv.url("/jobs?minSalary=100000&hasEquity=true&title=JOB"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["jobs"][0]["equity"], "0.030");

    let statements = srv.executor.statements();
    assert_eq!(statements.len(), 1);
    let stmt = &statements[0];
    assert!(stmt.sql.contains("salary >= $1"));
    assert!(stmt.sql.contains("equity > 0"));
    assert!(stmt.sql.contains("ILIKE"));
    assert!(!stmt.sql.contains("JOB"));
    assert_eq!(stmt.placeholder_count(), stmt.params.len());
}

#[tokio::test]
async fn listing_with_malformed_min_salary_is_400() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/jobs?minSalary=lots")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(srv.executor.statements().is_empty());
}

#[tokio::test]
async fn get_by_handle_wraps_the_job_under_jobs() {
    let srv = TestServer::spawn().await;
    srv.executor.push_jobs([job("job1", Some(100_001), Some("0"), "c1")]);

    let res = reqwest::get(srv.url("/jobs/c1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["jobs"]["companyHandle"], "c1");
    assert_eq!(body["jobs"]["title"], "job1");

    let res = reqwest::get(srv.url("/jobs/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_can_patch_compensation_fields() {
    let srv = TestServer::spawn().await;
    srv.executor.push_jobs([job("job1", Some(5), Some("0.5"), "c1")]);

    let res = reqwest::Client::new()
        .patch(srv.url("/jobs/c1"))
        .bearer_auth(admin_token())
        .json(&json!({ "salary": 5, "equity": "0.5" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["jobs"]["salary"], 5);
    assert_eq!(body["jobs"]["equity"], "0.5");

    let stmt = &srv.executor.statements()[0];
    assert!(stmt.sql.contains(r#""salary"=$"#));
    assert!(stmt.sql.contains(r#""equity"=$"#));
    assert!(stmt.sql.contains("company_handle = $3"));
    assert_eq!(stmt.params.len(), 3);
}

#[tokio::test]
async fn patch_rejects_empty_unknown_and_malformed_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let bad_bodies = [
        json!({}),
        json!({ "title": "renamed" }),
        json!({ "companyHandle": "c2" }),
        json!({ "equity": 0.5 }),
        json!({ "salary": "lots" }),
    ];

    for body in bad_bodies {
        let res = client
            .patch(srv.url("/jobs/c1"))
            .bearer_auth(admin_token())
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {body}");
    }

    assert!(srv.executor.statements().is_empty());
}

#[tokio::test]
async fn patch_of_missing_handle_is_404() {
    let srv = TestServer::spawn().await;

    let res = reqwest::Client::new()
        .patch(srv.url("/jobs/nope"))
        .bearer_auth(admin_token())
        .json(&json!({ "salary": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_delete_again_is_404() {
    let srv = TestServer::spawn().await;
    srv.executor.push_jobs([job("job1", None, None, "c1")]);
    let client = reqwest::Client::new();

    let res = client
        .delete(srv.url("/jobs/c1"))
        .bearer_auth(admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "deleted": "c1" }));

    let res = client
        .delete(srv.url("/jobs/c1"))
        .bearer_auth(admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
