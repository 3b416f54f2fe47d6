//! The request/response context a record is built from.

use http::header::IntoHeaderName;
use http::request::Parts;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use std::net::IpAddr;
use tollgate_body::DecodedBody;

/// Everything the request layer knows about a finished request.
///
/// The context is filled in by whoever drives the request (the gateway
/// middleware, or a test); building a record from it performs no I/O.
#[derive(Debug, Clone)]
pub struct AuditContext {
    pub method: Method,
    pub request_uri: String,
    pub headers: HeaderMap,
    /// Address of the peer on the connection.
    pub remote_addr: Option<IpAddr>,
    pub response_status: StatusCode,
    /// Body as produced by the body decoder.
    pub request_body: Option<DecodedBody>,
    pub response_body: Option<serde_json::Value>,
}

impl AuditContext {
    pub fn new(method: Method, request_uri: impl Into<String>) -> Self {
        Self {
            method,
            request_uri: request_uri.into(),
            headers: HeaderMap::new(),
            remote_addr: None,
            response_status: StatusCode::OK,
            request_body: None,
            response_body: None,
        }
    }

    /// Take method, target and headers from a request head.
    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(parts.method.clone(), parts.uri.to_string()).headers(parts.headers.clone())
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn header(mut self, name: impl IntoHeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn response_status(mut self, status: StatusCode) -> Self {
        self.response_status = status;
        self
    }

    pub fn request_body(mut self, body: DecodedBody) -> Self {
        self.request_body = Some(body);
        self
    }

    pub fn response_body(mut self, body: serde_json::Value) -> Self {
        self.response_body = Some(body);
        self
    }
}
