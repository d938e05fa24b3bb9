//! Connection health indicator
//!
//! Derives the connected/disconnected state from one `/health` call.

use crate::api::types::{HealthPayload, decode};
use crate::error::ApiResult;
use chrono::{DateTime, Local};

/// Label shown while connected
pub const CONNECTED_LABEL: &str = "Connected to Trino";

/// Fallback when the health response gives no reason
pub const CONNECTION_FAILED: &str = "Connection failed";

/// Health indicator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No health check has completed yet
    Unknown,
    Connected { message: String },
    Disconnected { message: String },
}

impl ConnectionStatus {
    /// Interpret the outcome of a `/health` call.
    ///
    /// Connected only for a payload with `status == "healthy"`. Otherwise the
    /// payload's `message` is preferred, then [`CONNECTION_FAILED`].
    pub fn from_health(result: &ApiResult<serde_json::Value>) -> Self {
        match result {
            Ok(value) => {
                let payload: HealthPayload = decode(value.clone()).unwrap_or_default();
                if payload.is_healthy() {
                    ConnectionStatus::Connected {
                        message: CONNECTED_LABEL.to_string(),
                    }
                } else {
                    ConnectionStatus::Disconnected {
                        message: payload
                            .message
                            .unwrap_or_else(|| CONNECTION_FAILED.to_string()),
                    }
                }
            }
            Err(e) => ConnectionStatus::Disconnected {
                message: e
                    .payload_message()
                    .unwrap_or(CONNECTION_FAILED)
                    .to_string(),
            },
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }

    pub fn label(&self) -> &str {
        match self {
            ConnectionStatus::Unknown => "Checking connection...",
            ConnectionStatus::Connected { message } | ConnectionStatus::Disconnected { message } => {
                message
            }
        }
    }
}

/// Result of the most recent health check
#[derive(Debug, Clone)]
pub struct HealthCheck {
    pub status: ConnectionStatus,
    pub checked_at: DateTime<Local>,
}

impl HealthCheck {
    pub fn new(status: ConnectionStatus) -> Self {
        Self {
            status,
            checked_at: Local::now(),
        }
    }

    /// Indicator text; a completed check is stamped with its local time
    pub fn indicator_label(&self) -> String {
        match self.status {
            ConnectionStatus::Unknown => self.status.label().to_string(),
            _ => format!(
                "{} · {}",
                self.status.label(),
                self.checked_at.format("%H:%M:%S")
            ),
        }
    }
}
