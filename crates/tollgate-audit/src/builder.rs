//! Assembly of audit records from a request context.

use chrono::Utc;
use http::header::USER_AGENT;
use http::{HeaderMap, HeaderName};
use tollgate_core::AuditLevel;
use uuid::Uuid;

use crate::context::AuditContext;
use crate::record::{AuditRecord, UserInfo};
use crate::source_ip::source_ips;

/// Header naming the impersonated user.
pub static IMPERSONATE_USER: HeaderName = HeaderName::from_static("impersonate-user");
/// Header naming the impersonated group.
pub static IMPERSONATE_GROUP: HeaderName = HeaderName::from_static("impersonate-group");

/// Builds [`AuditRecord`]s at a fixed [`AuditLevel`].
#[derive(Debug, Clone, Copy)]
pub struct AuditRecordBuilder {
    level: AuditLevel,
}

impl AuditRecordBuilder {
    pub fn new(level: AuditLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> AuditLevel {
        self.level
    }

    /// Build the record for one request/response cycle.
    ///
    /// Every call gets a fresh ID and the current time. Bodies are copied
    /// from the context only when the level allows them.
    pub fn build(&self, ctx: &AuditContext) -> AuditRecord {
        let user = UserInfo {
            name: header_string(&ctx.headers, &IMPERSONATE_USER),
            group: header_string(&ctx.headers, &IMPERSONATE_GROUP),
        };
        let user_agent = header_string(&ctx.headers, &USER_AGENT);

        AuditRecord {
            audit_id: Uuid::new_v4(),
            level: self.level,
            request_received_timestamp: Utc::now(),
            request_uri: ctx.request_uri.clone(),
            verb: ctx.method.to_string(),
            response_status: ctx.response_status.as_u16(),
            source_ips: source_ips(&ctx.headers, ctx.remote_addr)
                .iter()
                .map(ToString::to_string)
                .collect(),
            user: (!user.is_empty()).then_some(user),
            user_agent: (!user_agent.is_empty()).then_some(user_agent),
            request_body: if self.level.captures_request_body() {
                ctx.request_body.clone()
            } else {
                None
            },
            response_body: if self.level.captures_response_body() {
                ctx.response_body.clone()
            } else {
                None
            },
        }
    }
}

/// Header value as text; missing or non-UTF-8 values read as empty.
fn header_string(headers: &HeaderMap, name: &HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
