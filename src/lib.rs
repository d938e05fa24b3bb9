//! trinav - A keyboard-driven browser for Trino catalogs in the terminal
//!
//! trinav talks to a Trino explorer REST API and lets you drill from catalog
//! to schema to table, one lazily fetched level at a time.
//!
//! # Features
//!
//! - **Catalog Browser**: Catalogs, schemas and tables side by side
//! - **Health Indicator**: Connection state from the API's health endpoint
//! - **Breadcrumbs**: The current position in the hierarchy at a glance
//! - **Table Details**: Column names, types and nullability on demand
//! - **Keyboard-First**: All operations accessible via keyboard shortcuts
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`api`]: Explorer API client and response shapes
//! - [`nav`]: Selection state, navigation intents and stale-response tracking
//! - [`monitor`]: Connection health interpretation
//! - [`loader`]: Background requests feeding the app event channel
//! - [`config`]: Environments and application settings
//! - [`ui`]: Terminal user interface components
//! - [`commands`]: Command parsing for the command bar
//! - [`error`]: Error types and result aliases
//! - [`app`]: Application state and event handling
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use trinav::api::{ExplorerApi, HttpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new("http://localhost:5000/api", Duration::from_secs(30))?;
//!
//! let catalogs = client.catalogs().await?;
//! for catalog in catalogs.catalogs.unwrap_or_default() {
//!     let schemas = client.schemas(&catalog).await?;
//!     println!("{}: {:?}", catalog, schemas.schemas);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod keymap;
pub mod loader;
pub mod monitor;
pub mod nav;
pub mod ui;

pub use error::{ApiError, CommandError, ConfigError, Result, TrinavError};
