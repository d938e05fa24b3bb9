//! Background loads
//!
//! Runs the `Action`s the app returns as tokio tasks. Every task reports back
//! through the app event channel; the app never awaits a request.

use crate::api::{Endpoint, ExplorerApi};
use crate::app::{Action, AppEvent};
use crate::error::ApiResult;
use crate::monitor::ConnectionStatus;
use crate::nav::LoadTicket;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Spawns API requests and forwards their outcome as `AppEvent`s
pub struct Loader {
    api: Arc<dyn ExplorerApi>,
    events: UnboundedSender<AppEvent>,
}

impl Loader {
    pub fn new(api: Arc<dyn ExplorerApi>, events: UnboundedSender<AppEvent>) -> Self {
        Self { api, events }
    }

    /// Start the request behind `action`.
    ///
    /// Returns `None` for actions that involve no request (`Quit`, `None`).
    pub fn run(&self, action: Action) -> Option<JoinHandle<()>> {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let task = match action {
            Action::CheckHealth { seq } => {
                tokio::spawn(async move { check_health(api.as_ref(), &events, seq).await })
            }
            Action::LoadCatalogs { ticket } => {
                tokio::spawn(async move { load_catalogs(api.as_ref(), &events, ticket).await })
            }
            Action::LoadSchemas { ticket, catalog } => tokio::spawn(async move {
                load_schemas(api.as_ref(), &events, ticket, &catalog).await
            }),
            Action::LoadTables {
                ticket,
                catalog,
                schema,
            } => tokio::spawn(async move {
                load_tables(api.as_ref(), &events, ticket, &catalog, &schema).await
            }),
            Action::LoadDetails {
                ticket,
                catalog,
                schema,
                table,
            } => tokio::spawn(async move {
                load_details(api.as_ref(), &events, ticket, &catalog, &schema, &table).await
            }),
            Action::Quit | Action::None => return None,
        };
        Some(task)
    }
}

fn emit(events: &UnboundedSender<AppEvent>, event: AppEvent) {
    if events.send(event).is_err() {
        debug!("event channel closed, dropping load result");
    }
}

/// Await `request`; on failure log it, publish it to the app and yield `None`.
///
/// Callers treat `None` as "no data, error already surfaced".
pub async fn fetch<T>(
    events: &UnboundedSender<AppEvent>,
    endpoint: Endpoint,
    ticket: Option<&LoadTicket>,
    request: impl Future<Output = ApiResult<T>>,
) -> Option<T> {
    match request.await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(endpoint = endpoint.path(), error = %e, "API request failed");
            emit(
                events,
                AppEvent::LoadFailed {
                    ticket: ticket.cloned(),
                    message: e.to_string(),
                },
            );
            None
        }
    }
}

/// One `/health` call, numbered `seq`. A failure turns the indicator red
/// and carries its message for the error banner.
pub async fn check_health(api: &dyn ExplorerApi, events: &UnboundedSender<AppEvent>, seq: u64) {
    let result = api.health().await;
    let error = match &result {
        Ok(_) => None,
        Err(e) => {
            warn!(endpoint = Endpoint::Health.path(), error = %e, "API request failed");
            Some(e.to_string())
        }
    };
    emit(
        events,
        AppEvent::HealthChecked {
            seq,
            status: ConnectionStatus::from_health(&result),
            error,
        },
    );
}

pub async fn load_catalogs(
    api: &dyn ExplorerApi,
    events: &UnboundedSender<AppEvent>,
    ticket: LoadTicket,
) {
    info!(seq = ticket.seq, "loading catalogs");
    let Some(list) = fetch(events, Endpoint::Catalogs, Some(&ticket), api.catalogs()).await else {
        return;
    };
    emit(
        events,
        AppEvent::CatalogsLoaded {
            ticket,
            catalogs: list.catalogs,
        },
    );
}

pub async fn load_schemas(
    api: &dyn ExplorerApi,
    events: &UnboundedSender<AppEvent>,
    ticket: LoadTicket,
    catalog: &str,
) {
    info!(seq = ticket.seq, catalog, "loading schemas");
    let request = api.schemas(catalog);
    let Some(list) = fetch(events, Endpoint::Schemas, Some(&ticket), request).await else {
        return;
    };
    emit(
        events,
        AppEvent::SchemasLoaded {
            ticket,
            schemas: list.schemas,
        },
    );
}

pub async fn load_tables(
    api: &dyn ExplorerApi,
    events: &UnboundedSender<AppEvent>,
    ticket: LoadTicket,
    catalog: &str,
    schema: &str,
) {
    info!(seq = ticket.seq, catalog, schema, "loading tables");
    let request = api.tables(catalog, schema);
    let Some(list) = fetch(events, Endpoint::Tables, Some(&ticket), request).await else {
        return;
    };
    emit(
        events,
        AppEvent::TablesLoaded {
            ticket,
            tables: list.tables,
        },
    );
}

pub async fn load_details(
    api: &dyn ExplorerApi,
    events: &UnboundedSender<AppEvent>,
    ticket: LoadTicket,
    catalog: &str,
    schema: &str,
    table: &str,
) {
    info!(seq = ticket.seq, catalog, schema, table, "loading table details");
    let request = api.table_details(catalog, schema, table);
    let Some(details) = fetch(events, Endpoint::TableDetails, Some(&ticket), request).await
    else {
        return;
    };
    emit(
        events,
        AppEvent::DetailsLoaded {
            ticket,
            columns: details.columns,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_url;
    use crate::error::ApiError;
    use crate::nav::{Level, LoadTracker};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    const BASE: &str = "http://fake/api";

    /// Canned responses keyed by full URL
    #[derive(Default)]
    struct FakeApi {
        responses: HashMap<String, ApiResult<Value>>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn respond(mut self, endpoint: &str, params: &[(&str, &str)], body: ApiResult<Value>) -> Self {
            self.responses.insert(build_url(BASE, endpoint, params), body);
            self
        }
    }

    #[async_trait]
    impl ExplorerApi for FakeApi {
        async fn call(&self, endpoint: &str, params: &[(&str, &str)]) -> ApiResult<Value> {
            let url = build_url(BASE, endpoint, params);
            self.requested.lock().unwrap().push(url.clone());
            self.responses
                .get(&url)
                .cloned()
                .unwrap_or_else(|| Err(ApiError::Network("connection refused".into())))
        }

        fn base_url(&self) -> &str {
            BASE
        }
    }

    fn not_found(message: &str) -> ApiResult<Value> {
        Err(ApiError::from_error_body(
            404,
            json!({ "error": message }).to_string().as_bytes(),
        ))
    }

    fn channel() -> (UnboundedSender<AppEvent>, UnboundedReceiver<AppEvent>) {
        mpsc::unbounded_channel()
    }

    fn ticket(level: Level, parents: &[&str]) -> LoadTicket {
        LoadTracker::new().issue(level, parents.iter().map(|s| s.to_string()).collect())
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_message_and_returns_none() {
        let (tx, mut rx) = channel();
        let t = ticket(Level::Schemas, &["missing"]);
        let result: Option<Value> =
            fetch(&tx, Endpoint::Schemas, Some(&t), async { not_found("catalog not found") }).await;

        assert!(result.is_none());
        match rx.try_recv().unwrap() {
            AppEvent::LoadFailed { ticket, message } => {
                assert_eq!(message, "catalog not found");
                assert_eq!(ticket, Some(t));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_success_publishes_nothing() {
        let (tx, mut rx) = channel();
        let result = fetch(&tx, Endpoint::Catalogs, None, async { Ok(json!({})) }).await;
        assert_eq!(result, Some(json!({})));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_load_schemas_sends_list() {
        let api = FakeApi::default().respond(
            "schemas",
            &[("catalog", "hive")],
            Ok(json!({ "schemas": ["default", "sales"] })),
        );
        let (tx, mut rx) = channel();
        let t = ticket(Level::Schemas, &["hive"]);
        load_schemas(&api, &tx, t.clone(), "hive").await;

        match rx.try_recv().unwrap() {
            AppEvent::SchemasLoaded { ticket, schemas } => {
                assert_eq!(ticket, t);
                assert_eq!(schemas, Some(vec!["default".into(), "sales".into()]));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            *api.requested.lock().unwrap(),
            vec!["http://fake/api/schemas?catalog=hive".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_list_field_is_absent_not_error() {
        let api = FakeApi::default().respond("catalogs", &[], Ok(json!({ "other": 1 })));
        let (tx, mut rx) = channel();
        load_catalogs(&api, &tx, ticket(Level::Catalogs, &[])).await;

        match rx.try_recv().unwrap() {
            AppEvent::CatalogsLoaded { catalogs, .. } => assert!(catalogs.is_none()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrongly_typed_body_is_decode_error() {
        let api = FakeApi::default().respond("catalogs", &[], Ok(json!({ "catalogs": "hive" })));
        let (tx, mut rx) = channel();
        load_catalogs(&api, &tx, ticket(Level::Catalogs, &[])).await;

        match rx.try_recv().unwrap() {
            AppEvent::LoadFailed { message, .. } => {
                assert!(message.starts_with("Invalid response from server"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_tables_passes_both_params() {
        let api = FakeApi::default().respond(
            "tables",
            &[("catalog", "hive"), ("schema", "default")],
            Ok(json!({ "tables": ["t1"] })),
        );
        let (tx, mut rx) = channel();
        load_tables(&api, &tx, ticket(Level::Tables, &["hive", "default"]), "hive", "default")
            .await;
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::TablesLoaded { tables: Some(t), .. } if t == vec!["t1".to_string()]
        ));
    }

    #[tokio::test]
    async fn test_load_details_decodes_columns() {
        let api = FakeApi::default().respond(
            "table/details",
            &[("catalog", "hive"), ("schema", "default"), ("table", "t1")],
            Ok(json!({ "columns": [
                { "column_name": "id", "data_type": "bigint", "is_nullable": "NO" }
            ] })),
        );
        let (tx, mut rx) = channel();
        let t = ticket(Level::Details, &["hive", "default", "t1"]);
        load_details(&api, &tx, t, "hive", "default", "t1").await;

        match rx.try_recv().unwrap() {
            AppEvent::DetailsLoaded { columns, .. } => {
                let columns = columns.unwrap();
                assert_eq!(columns[0].column_name, "id");
                assert!(!columns[0].nullable());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_health_healthy() {
        let api = FakeApi::default().respond("health", &[], Ok(json!({ "status": "healthy" })));
        let (tx, mut rx) = channel();
        check_health(&api, &tx, 1).await;
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::HealthChecked {
                seq: 1,
                status: ConnectionStatus::Connected { .. },
                error: None,
            }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_health_unhealthy_payload() {
        let api = FakeApi::default().respond(
            "health",
            &[],
            Ok(json!({ "status": "down", "message": "db unreachable" })),
        );
        let (tx, mut rx) = channel();
        check_health(&api, &tx, 1).await;
        match rx.try_recv().unwrap() {
            AppEvent::HealthChecked { status, error, .. } => {
                assert!(error.is_none());
                assert_eq!(
                    status,
                    ConnectionStatus::Disconnected {
                        message: "db unreachable".into()
                    }
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_health_network_failure_surfaces_error() {
        let api = FakeApi::default();
        let (tx, mut rx) = channel();
        check_health(&api, &tx, 3).await;

        match rx.try_recv().unwrap() {
            AppEvent::HealthChecked { seq, status, error } => {
                assert_eq!(seq, 3);
                assert!(!status.is_connected());
                assert_eq!(status.label(), "Connection failed");
                assert_eq!(error.as_deref(), Some("connection refused"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_run_spawns_and_ignores_non_loads() {
        let api = Arc::new(
            FakeApi::default().respond("catalogs", &[], Ok(json!({ "catalogs": ["hive"] }))),
        );
        let (tx, mut rx) = channel();
        let loader = Loader::new(api, tx);

        assert!(loader.run(Action::None).is_none());
        assert!(loader.run(Action::Quit).is_none());

        let handle = loader
            .run(Action::LoadCatalogs {
                ticket: ticket(Level::Catalogs, &[]),
            })
            .unwrap();
        handle.await.unwrap();
        assert!(matches!(
            rx.recv().await.unwrap(),
            AppEvent::CatalogsLoaded { catalogs: Some(_), .. }
        ));
    }
}
