//! App and Loader driven end to end against the mock explorer API

use crate::common::{HealthMode, MockServer, harness, settle, unreachable_base_url};
use trinav::app::{Action, PanelFocus};
use trinav::monitor::ConnectionStatus;
use trinav::nav::{Level, NavIntent};

fn labels(panel: &trinav::ui::panel::ListPanel) -> Vec<String> {
    panel.rows().iter().map(|row| row.label.clone()).collect()
}

fn select_catalog(catalog: &str) -> NavIntent {
    NavIntent::SelectCatalog {
        catalog: catalog.to_string(),
    }
}

#[tokio::test]
async fn test_startup_loads_catalogs_and_health() {
    let server = MockServer::start().await;
    let (mut app, loader, mut events) = harness(&server.base_url);

    for action in app.startup() {
        settle(&mut app, &loader, &mut events, action).await;
    }

    assert_eq!(labels(&app.catalogs), vec!["hive", "iceberg"]);
    assert!(app.connection.status.is_connected());
    assert!(app.error_banner.is_none());
    assert!(!app.schemas.is_visible());
}

#[tokio::test]
async fn test_drill_down_to_columns() {
    let server = MockServer::start().await;
    let (mut app, loader, mut events) = harness(&server.base_url);
    let load = app.load_catalogs();
    settle(&mut app, &loader, &mut events, load).await;

    let action = app.dispatch(select_catalog("hive"));
    settle(&mut app, &loader, &mut events, action).await;
    assert_eq!(labels(&app.schemas), vec!["default", "sales"]);
    assert!(app.schemas.is_visible());
    assert_eq!(app.catalogs.active_index(), Some(0));
    assert_eq!(app.focus, PanelFocus::Schemas);

    let action = app.dispatch(NavIntent::SelectSchema {
        catalog: "hive".into(),
        schema: "default".into(),
    });
    settle(&mut app, &loader, &mut events, action).await;
    assert_eq!(labels(&app.tables), vec!["t1", "orders"]);
    assert_eq!(app.focus, PanelFocus::Tables);

    let action = app.dispatch(NavIntent::SelectTable {
        catalog: "hive".into(),
        schema: "default".into(),
        table: "t1".into(),
    });
    assert_eq!(action, Action::None);
    assert_eq!(app.selection().breadcrumbs(), vec!["Home", "hive", "default", "t1"]);

    let action = app.describe_selected();
    settle(&mut app, &loader, &mut events, action).await;
    let columns: Vec<&str> = app
        .details
        .columns()
        .iter()
        .map(|c| c.column_name.as_str())
        .collect();
    assert_eq!(columns, vec!["id", "name"]);
    assert!(!app.details.is_loading());
    assert!(
        server
            .requests()
            .contains(&"/api/table/details?catalog=hive&schema=default&table=t1".to_string())
    );
}

#[tokio::test]
async fn test_empty_catalog_shows_placeholder() {
    let server = MockServer::start().await;
    let (mut app, loader, mut events) = harness(&server.base_url);

    let action = app.dispatch(select_catalog("iceberg"));
    settle(&mut app, &loader, &mut events, action).await;

    assert!(app.schemas.is_visible());
    assert!(app.schemas.rows().is_empty());
    assert_eq!(app.schemas.placeholder(), Some(Level::Schemas.empty_message()));
    assert_eq!(app.focus, PanelFocus::Catalogs);
}

#[tokio::test]
async fn test_missing_catalog_shows_banner() {
    let server = MockServer::start().await;
    let (mut app, loader, mut events) = harness(&server.base_url);

    let action = app.dispatch(select_catalog("missing"));
    settle(&mut app, &loader, &mut events, action).await;

    assert_eq!(app.error_banner.as_deref(), Some("catalog not found"));
    assert!(!app.schemas.is_loading());
    assert!(!app.schemas.is_visible());
}

#[tokio::test]
async fn test_missing_list_field_leaves_panel_unrendered() {
    let server = MockServer::start().await;
    let (mut app, loader, mut events) = harness(&server.base_url);

    let action = app.dispatch(select_catalog("legacy"));
    settle(&mut app, &loader, &mut events, action).await;

    assert!(app.error_banner.is_none());
    assert!(!app.schemas.is_loading());
    assert!(app.schemas.rows().is_empty());
    assert!(app.schemas.placeholder().is_none());
}

#[tokio::test]
async fn test_new_selection_clears_banner() {
    let server = MockServer::start().await;
    let (mut app, loader, mut events) = harness(&server.base_url);

    let action = app.dispatch(select_catalog("missing"));
    settle(&mut app, &loader, &mut events, action).await;
    assert!(app.error_banner.is_some());

    let action = app.dispatch(select_catalog("hive"));
    assert!(app.error_banner.is_none());
    settle(&mut app, &loader, &mut events, action).await;
    assert!(app.error_banner.is_none());
    assert_eq!(labels(&app.schemas).len(), 2);
}

#[tokio::test]
async fn test_out_of_order_responses_keep_latest_selection() {
    let server = MockServer::start().await;
    let (mut app, loader, mut events) = harness(&server.base_url);

    let first = app.dispatch(select_catalog("hive"));
    let second = app.dispatch(select_catalog("iceberg"));

    settle(&mut app, &loader, &mut events, second).await;
    settle(&mut app, &loader, &mut events, first).await;

    assert_eq!(app.selection().catalog(), Some("iceberg"));
    assert!(app.schemas.rows().is_empty());
    assert_eq!(app.schemas.placeholder(), Some(Level::Schemas.empty_message()));
}

#[tokio::test]
async fn test_unhealthy_server_sets_indicator_and_banner() {
    let server = MockServer::start().await;
    server.set_health(HealthMode::Unavailable);
    let (mut app, loader, mut events) = harness(&server.base_url);

    let action = app.check_health();
    assert_eq!(app.connection.status, ConnectionStatus::Unknown);
    settle(&mut app, &loader, &mut events, action).await;

    assert_eq!(app.connection.status.label(), "Trino is unreachable");
    assert!(!app.connection.status.is_connected());
    assert!(app.error_banner.is_some());
}

#[tokio::test]
async fn test_unreachable_server_surfaces_error() {
    let base_url = unreachable_base_url().await;
    let (mut app, loader, mut events) = harness(&base_url);

    for action in app.startup() {
        settle(&mut app, &loader, &mut events, action).await;
    }

    assert!(app.error_banner.is_some());
    assert!(!app.catalogs.is_loading());
    assert!(app.catalogs.rows().is_empty());
    assert!(!app.connection.status.is_connected());
}

#[tokio::test]
async fn test_superseded_health_check_is_ignored() {
    let server = MockServer::start().await;
    server.set_health(HealthMode::Unavailable);
    let (mut app, loader, mut events) = harness(&server.base_url);

    let first = app.check_health();
    loader.run(first).unwrap().await.unwrap();
    let late_failure = events.try_recv().unwrap();

    server.set_health(HealthMode::Healthy);
    let second = app.check_health();
    settle(&mut app, &loader, &mut events, second).await;
    app.handle_event(late_failure).unwrap();

    assert!(app.connection.status.is_connected());
    assert!(app.error_banner.is_none());
}
