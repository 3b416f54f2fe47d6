//! The serialized audit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tollgate_body::DecodedBody;
use tollgate_core::AuditLevel;
use uuid::Uuid;

/// Impersonated identity taken from the request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,
}

impl UserInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.group.is_empty()
    }
}

/// One request/response cycle, as written to the audit trail.
///
/// Records are built once, written once and never changed. Absent values are
/// left out of the serialized form instead of being written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Unique record ID.
    #[serde(rename = "auditID")]
    pub audit_id: Uuid,

    /// When the record was built.
    pub request_received_timestamp: DateTime<Utc>,

    /// Request target as sent by the client.
    #[serde(rename = "requestURI")]
    pub request_uri: String,

    /// HTTP method.
    pub verb: String,

    /// Status code of the response.
    pub response_status: u16,

    /// Client addresses, most specific first.
    #[serde(rename = "sourceIPs", default)]
    pub source_ips: Vec<String>,

    /// Impersonated identity, if any header named one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,

    /// `User-Agent` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Detail tier the record was built at.
    pub level: AuditLevel,

    /// Decoded request body (`RequestLevel` and above).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<DecodedBody>,

    /// Response body (`RequestResponseLevel` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<serde_json::Value>,
}
