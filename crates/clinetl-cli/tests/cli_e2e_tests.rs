//! End-to-end tests for the clinetl binary against a mocked ETL server

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn clinetl(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("clinetl").unwrap();
    cmd.env("ETL_SERVER_URL", server.uri())
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_OUTPUT");
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "healthy", "service": "etl"})),
        )
        .mount(&server)
        .await;

    clinetl(&server)
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("healthy"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_wait_failed_job_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/jobs"))
        .and(query_param("wait", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobId": "job-1",
            "status": "failed",
            "message": "ETL failed: Source unavailable: 'nope.csv': No such file or directory"
        })))
        .mount(&server)
        .await;

    clinetl(&server)
        .args(["submit", "job-1", "nope.csv", "--wait"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Job 'job-1' failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json_output() {
    let server = MockServer::start().await;
    let status = json!({
        "jobId": "job-1",
        "status": "completed",
        "progress": 100,
        "message": "Inserted 3 rows into clinical_measurements"
    });
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/job-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status.clone()))
        .mount(&server)
        .await;

    let output = clinetl(&server)
        .args(["status", "job-1", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, status);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_unknown_job() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/ghost/status"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "Job not found: ghost", "status": 404}
        })))
        .mount(&server)
        .await;

    clinetl(&server)
        .args(["status", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Job 'ghost' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_rejects_unknown_status_locally() {
    let server = MockServer::start().await;

    clinetl(&server)
        .args(["list", "--status", "pending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}
