//! Explorer API access
//!
//! This module provides a trait-based abstraction over the explorer REST API,
//! so the application can be driven by the HTTP client in production and by
//! in-memory fakes in tests.

pub mod http;
pub mod types;

pub use http::{HttpClient, build_url};
pub use types::{CatalogList, ColumnInfo, HealthPayload, SchemaList, TableDetails, TableList};

use crate::error::ApiResult;
use async_trait::async_trait;
use types::decode;

/// The explorer endpoints trinav talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Catalogs,
    Schemas,
    Tables,
    TableDetails,
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Health => "health",
            Endpoint::Catalogs => "catalogs",
            Endpoint::Schemas => "schemas",
            Endpoint::Tables => "tables",
            Endpoint::TableDetails => "table/details",
        }
    }
}

/// Read-only access to the explorer API
///
/// Implementations issue a GET for `endpoint` with `params` as the query
/// string and return the parsed JSON body of a successful response.
#[async_trait]
pub trait ExplorerApi: Send + Sync {
    /// Fetch `endpoint` with the given query parameters
    ///
    /// # Errors
    /// - `ApiError::Network` if no response was received
    /// - `ApiError::Status` for non-2xx responses, carrying the body's `error`
    /// - `ApiError::Decode` if a successful body is not JSON
    async fn call(&self, endpoint: &str, params: &[(&str, &str)]) -> ApiResult<serde_json::Value>;

    /// Base URL requests are issued against (for display)
    fn base_url(&self) -> &str;

    /// Raw `/health` body; interpretation is left to the connection monitor
    async fn health(&self) -> ApiResult<serde_json::Value> {
        self.call(Endpoint::Health.path(), &[]).await
    }

    async fn catalogs(&self) -> ApiResult<CatalogList> {
        decode(self.call(Endpoint::Catalogs.path(), &[]).await?)
    }

    async fn schemas(&self, catalog: &str) -> ApiResult<SchemaList> {
        decode(
            self.call(Endpoint::Schemas.path(), &[("catalog", catalog)])
                .await?,
        )
    }

    async fn tables(&self, catalog: &str, schema: &str) -> ApiResult<TableList> {
        decode(
            self.call(
                Endpoint::Tables.path(),
                &[("catalog", catalog), ("schema", schema)],
            )
            .await?,
        )
    }

    async fn table_details(
        &self,
        catalog: &str,
        schema: &str,
        table: &str,
    ) -> ApiResult<TableDetails> {
        decode(
            self.call(
                Endpoint::TableDetails.path(),
                &[("catalog", catalog), ("schema", schema), ("table", table)],
            )
            .await?,
        )
    }
}
