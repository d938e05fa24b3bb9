//! HttpClient against the mock explorer API

use crate::common::{HealthMode, MockServer, unreachable_base_url};
use std::time::Duration;
use tokio::sync::mpsc;
use trinav::ApiError;
use trinav::api::{Endpoint, ExplorerApi, HttpClient};
use trinav::app::AppEvent;
use trinav::error::GENERIC_API_FAILURE;
use trinav::loader::fetch;
use trinav::monitor::{CONNECTION_FAILED, ConnectionStatus};

fn client(base_url: &str) -> HttpClient {
    HttpClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_catalogs_listed() {
    let server = MockServer::start().await;
    let list = client(&server.base_url).catalogs().await.unwrap();
    assert_eq!(list.catalogs.unwrap(), vec!["hive", "iceberg"]);
    assert_eq!(server.requests(), vec!["/api/catalogs"]);
}

#[tokio::test]
async fn test_query_parameters_sent() {
    let server = MockServer::start().await;
    let api = client(&server.base_url);

    api.schemas("hive").await.unwrap();
    api.tables("hive", "default").await.unwrap();
    api.table_details("hive", "default", "t1").await.unwrap();

    assert_eq!(
        server.requests(),
        vec![
            "/api/schemas?catalog=hive",
            "/api/tables?catalog=hive&schema=default",
            "/api/table/details?catalog=hive&schema=default&table=t1",
        ]
    );
}

#[tokio::test]
async fn test_table_details_columns() {
    let server = MockServer::start().await;
    let details = client(&server.base_url)
        .table_details("hive", "default", "t1")
        .await
        .unwrap();
    let columns = details.columns.unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].column_name, "id");
    assert_eq!(columns[0].data_type, "bigint");
    assert!(!columns[0].nullable());
    assert!(columns[1].nullable());
}

#[tokio::test]
async fn test_error_body_message_surfaces() {
    let server = MockServer::start().await;
    let err = client(&server.base_url).schemas("missing").await.unwrap_err();
    match &err {
        ApiError::Status { status, message, .. } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "catalog not found");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "catalog not found");
}

#[tokio::test]
async fn test_non_json_error_body_uses_generic_message() {
    let server = MockServer::start().await;
    let err = client(&server.base_url).schemas("broken").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), GENERIC_API_FAILURE);
}

#[tokio::test]
async fn test_missing_list_field_is_not_an_error() {
    let server = MockServer::start().await;
    let list = client(&server.base_url).schemas("legacy").await.unwrap();
    assert!(list.schemas.is_none());
}

#[tokio::test]
async fn test_mistyped_list_field_is_a_decode_error() {
    let server = MockServer::start().await;
    let err = client(&server.base_url).schemas("mistyped").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert!(err.to_string().starts_with("Invalid response from server"));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let base_url = unreachable_base_url().await;
    let err = client(&base_url).catalogs().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_request_timeout_is_network_error() {
    let server = MockServer::start().await;
    let api = HttpClient::new(&server.base_url, Duration::from_millis(200)).unwrap();
    let err = api.schemas("slow").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_fetch_reports_failure_and_yields_none() {
    let server = MockServer::start().await;
    let api = client(&server.base_url);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let result = fetch(&tx, Endpoint::Schemas, None, api.schemas("missing")).await;
    assert!(result.is_none());

    match rx.try_recv().unwrap() {
        AppEvent::LoadFailed { ticket, message } => {
            assert!(ticket.is_none());
            assert_eq!(message, "catalog not found");
        }
        other => panic!("expected LoadFailed, got {:?}", other),
    }
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_fetch_passes_value_through() {
    let server = MockServer::start().await;
    let api = client(&server.base_url);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let list = fetch(&tx, Endpoint::Catalogs, None, api.catalogs()).await;
    assert_eq!(list.unwrap().catalogs.unwrap().len(), 2);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_health_states() {
    let server = MockServer::start().await;
    let api = client(&server.base_url);

    let status = ConnectionStatus::from_health(&api.health().await);
    assert!(status.is_connected());

    server.set_health(HealthMode::Degraded);
    let status = ConnectionStatus::from_health(&api.health().await);
    assert_eq!(
        status,
        ConnectionStatus::Disconnected {
            message: CONNECTION_FAILED.to_string()
        }
    );

    server.set_health(HealthMode::Unavailable);
    let status = ConnectionStatus::from_health(&api.health().await);
    assert_eq!(
        status,
        ConnectionStatus::Disconnected {
            message: "Trino is unreachable".to_string()
        }
    );
}

#[tokio::test]
async fn test_health_unreachable_server() {
    let base_url = unreachable_base_url().await;
    let status = ConnectionStatus::from_health(&client(&base_url).health().await);
    assert_eq!(status.label(), CONNECTION_FAILED);
    assert!(!status.is_connected());
}
