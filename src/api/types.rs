//! Response shapes of the explorer endpoints

use crate::error::{ApiError, ApiResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Decode a successful response body into its typed shape
pub fn decode<T: DeserializeOwned>(value: serde_json::Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// `GET /health`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthPayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthPayload {
    pub fn is_healthy(&self) -> bool {
        self.status.as_deref() == Some("healthy")
    }
}

/// `GET /catalogs`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogList {
    #[serde(default)]
    pub catalogs: Option<Vec<String>>,
}

/// `GET /schemas?catalog=`
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaList {
    #[serde(default)]
    pub schemas: Option<Vec<String>>,
}

/// `GET /tables?catalog=&schema=`
#[derive(Debug, Clone, Deserialize)]
pub struct TableList {
    #[serde(default)]
    pub tables: Option<Vec<String>>,
}

/// `GET /table/details?catalog=&schema=&table=`
#[derive(Debug, Clone, Deserialize)]
pub struct TableDetails {
    #[serde(default)]
    pub columns: Option<Vec<ColumnInfo>>,
}

/// One column of a table, as reported by `information_schema`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
    /// `YES` / `NO`
    #[serde(default)]
    pub is_nullable: String,
}

impl ColumnInfo {
    pub fn nullable(&self) -> bool {
        self.is_nullable.eq_ignore_ascii_case("yes")
    }
}
