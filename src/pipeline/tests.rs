//! Unit tests for the pipeline runner

use super::*;
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn interval() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn galaxy_body() -> serde_json::Value {
    json!({
        "title": "Galaxy",
        "explanation": "...",
        "url": "http://x",
        "date": "2024-06-01",
        "media_type": "image"
    })
}

fn pipeline_for(server: &MockServer, retry: RetryPolicy) -> ApodPipeline {
    let client = ApodClient::new(server.uri(), "TEST_KEY", Duration::from_secs(5)).unwrap();
    let db = ApodDatabase::open_in_memory().unwrap();
    ApodPipeline::new(client, db, retry)
}

#[test]
fn test_step_display() {
    assert_eq!(Step::CreateTable.to_string(), "create_table");
    assert_eq!(Step::Extract.to_string(), "extract");
    assert_eq!(Step::Transform.to_string(), "transform");
    assert_eq!(Step::Load.to_string(), "load");
}

#[test]
fn test_default_retry_policy() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.retries, 1);
    assert_eq!(policy.delay, Duration::from_secs(300));
    assert_eq!(RetryPolicy::none().retries, 0);
}

#[tokio::test]
async fn test_run_once_loads_one_row() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .and(query_param("api_key", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(galaxy_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipeline = pipeline_for(&mock_server, RetryPolicy::none());
    let (row_id, record) = pipeline.run_once(interval(), None).await.unwrap();

    let db = pipeline.database();
    assert_eq!(db.count_records().unwrap(), 1);
    let stored = db.latest_record().unwrap().unwrap();
    assert_eq!(stored.id, row_id);
    assert_eq!(stored.to_record(), record);
    assert_eq!(record.title, "Galaxy");
    assert_eq!(record.url, "http://x");
    assert_eq!(record.date, "2024-06-01");
    assert_eq!(record.media_type, "image");
}

#[tokio::test]
async fn test_run_once_fetch_failure_inserts_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let pipeline = pipeline_for(&mock_server, RetryPolicy::none());
    let err = pipeline.run_once(interval(), None).await.unwrap_err();

    assert_eq!(err.failed_step(), Some(Step::Extract));
    // The table step ran before the fetch, so the table exists but is empty
    let db = pipeline.database();
    assert!(db.table_exists().unwrap());
    assert_eq!(db.count_records().unwrap(), 0);
}

#[tokio::test]
async fn test_run_interval_reports_failure_after_retries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let pipeline = pipeline_for(&mock_server, RetryPolicy::new(2, Duration::ZERO));
    let err = pipeline.run_interval(interval(), None).await.unwrap_err();

    match &err {
        ApodError::IntervalFailed {
            interval: failed,
            attempts,
            ..
        } => {
            assert_eq!(*failed, interval());
            assert_eq!(*attempts, 3);
        }
        other => panic!("Expected IntervalFailed, got {other:?}"),
    }
    assert_eq!(err.failed_step(), Some(Step::Extract));
    assert_eq!(pipeline.database().count_records().unwrap(), 0);
}

#[tokio::test]
async fn test_run_interval_recovers_on_retry() {
    let mock_server = MockServer::start().await;
    // First request fails, later ones succeed
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(galaxy_body()))
        .with_priority(2)
        .mount(&mock_server)
        .await;

    let pipeline = pipeline_for(&mock_server, RetryPolicy::new(1, Duration::ZERO));
    let report = pipeline.run_interval(interval(), None).await.unwrap();

    assert_eq!(report.interval, interval());
    assert_eq!(report.attempts, 2);
    assert_eq!(report.record.title, "Galaxy");
    assert_eq!(pipeline.database().count_records().unwrap(), 1);
}

#[tokio::test]
async fn test_run_interval_passes_explicit_date() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .and(query_param("date", "2024-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(galaxy_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipeline = pipeline_for(&mock_server, RetryPolicy::none());
    let report = pipeline
        .run_interval(interval(), Some(interval()))
        .await
        .unwrap();

    assert_eq!(report.attempts, 1);
    assert_eq!(report.record.date, "2024-06-01");
}

#[tokio::test]
async fn test_rerun_appends_duplicate_rows() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(galaxy_body()))
        .mount(&mock_server)
        .await;

    let pipeline = pipeline_for(&mock_server, RetryPolicy::none());
    pipeline.run_interval(interval(), None).await.unwrap();
    pipeline.run_interval(interval(), None).await.unwrap();

    assert_eq!(pipeline.database().count_records().unwrap(), 2);
}

#[tokio::test]
async fn test_partial_body_loads_defaults() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "X"})))
        .mount(&mock_server)
        .await;

    let pipeline = pipeline_for(&mock_server, RetryPolicy::none());
    let report = pipeline.run_interval(interval(), None).await.unwrap();

    let stored = pipeline.database().latest_record().unwrap().unwrap();
    assert_eq!(stored.id, report.row_id);
    assert_eq!(stored.title.as_deref(), Some("X"));
    assert_eq!(stored.explanation.as_deref(), Some(""));
    assert_eq!(stored.media_type.as_deref(), Some(""));
}
