//! Structured audit records for catalog mutations.
//!
//! Emitted on the `audit` target so the subscriber can route them apart from
//! request logs.
//!
//! ```ignore
//! AuditEvent::new(Some(payload.user_id), "product.soft_delete", AuditOutcome::Success)
//!     .with_resource("product", id)
//!     .with_ip(client_ip(&headers))
//!     .log();
//! ```

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
}

#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Acting user as supplied in the payload
    pub actor: Option<Uuid>,
    /// Dotted action name, e.g. `product.create`
    pub action: String,
    /// `kind:id`, e.g. `product:0190...`
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(actor: Option<Uuid>, action: impl Into<String>, outcome: AuditOutcome) -> Self {
        Self {
            actor,
            action: action.into(),
            resource: None,
            outcome,
            ip_address: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_resource(mut self, kind: &str, id: impl Display) -> Self {
        self.resource = Some(format!("{kind}:{id}"));
        self
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    pub fn log(self) {
        tracing::info!(
            target: "audit",
            actor = ?self.actor,
            action = %self.action,
            resource = self.resource.as_deref(),
            outcome = ?self.outcome,
            ip = self.ip_address.as_deref(),
            timestamp = %self.timestamp,
            details = ?self.details,
            "audit"
        );
    }
}

/// Client address from `X-Forwarded-For` (first hop) or `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
}
