//! The decode → handle → audit middleware.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{ConnectInfo, Request, State};
use axum::http::request::Parts;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use std::net::SocketAddr;
use std::sync::Arc;
use tollgate_audit::AuditContext;
use tollgate_body::{BodyDecoder, BodyError, DecodeError, DecodedBody, carries_body};

use crate::error::GatewayError;
use crate::state::GatewayState;

/// The normalized body of a `PUT`/`POST` request, for handlers.
#[derive(Debug, Clone)]
pub struct DecodedRequestBody(pub DecodedBody);

/// Wrap every route of `router` in [`audit_requests`].
pub fn audited(router: Router, state: Arc<GatewayState>) -> Router {
    router.layer(from_fn_with_state(state, audit_requests))
}

/// Axum middleware: decode the body, run the handler, audit the cycle.
///
/// A body that fails to decode is answered with 422 without calling the
/// handler; that response is audited like any other.
pub async fn audit_requests(
    State(state): State<Arc<GatewayState>>,
    req: Request,
    next: Next,
) -> Response {
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let (parts, body) = req.into_parts();
    let mut ctx = AuditContext::from_parts(&parts);
    ctx.remote_addr = remote_addr;

    let response = match decode_request(&state.decoder, parts, body).await {
        Ok((req, decoded)) => {
            ctx.request_body = decoded;
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(error = %err, uri = %ctx.request_uri, "rejecting request body");
            err.into_response()
        }
    };

    finish(&state, ctx, response).await
}

/// Buffer and decode the body of a payload-carrying request, then rebuild the
/// request around the same bytes.
///
/// Bodies over the decoder's bound are rejected as invalid content before
/// they are fully read.
async fn decode_request(
    decoder: &BodyDecoder,
    mut parts: Parts,
    body: Body,
) -> Result<(Request, Option<DecodedBody>), GatewayError> {
    if !carries_body(&parts.method) {
        return Ok((Request::from_parts(parts, body), None));
    }

    let bytes = buffer_body(body, decoder.max_bytes()).await?;
    let decoded = decoder.decode_buffered(&parts.method, &parts.headers, &bytes)?;
    if let Some(decoded) = &decoded {
        parts.extensions.insert(DecodedRequestBody(decoded.clone()));
    }
    Ok((Request::from_parts(parts, Body::from(bytes)), decoded))
}

/// Collect `body`, failing once it goes past `max_bytes - 1` bytes.
async fn buffer_body(body: Body, max_bytes: u64) -> Result<Bytes, GatewayError> {
    let limit = max_bytes.saturating_sub(1);
    let mut buf = BytesMut::new();
    let mut chunks = body.into_data_stream();
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(GatewayError::ReadBody)?;
        if (buf.len() + chunk.len()) as u64 > limit {
            return Err(BodyError::from(DecodeError::TooLarge { max: limit }).into());
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

/// Capture what the level asks for from the response and write the record.
async fn finish(state: &GatewayState, mut ctx: AuditContext, response: Response) -> Response {
    let logger = &state.logger;
    if !logger.is_enabled() {
        return response;
    }

    let response = if logger.level().captures_response_body() {
        let (parts, body) = response.into_parts();
        match to_bytes(body, usize::MAX).await {
            Ok(bytes) => {
                // Non-JSON payloads are not recorded.
                ctx.response_body = serde_json::from_slice(&bytes).ok();
                Response::from_parts(parts, Body::from(bytes))
            }
            Err(err) => {
                tracing::warn!(error = %err, uri = %ctx.request_uri, "failed to buffer response body");
                GatewayError::ReadBody(err).into_response()
            }
        }
    } else {
        response
    };
    ctx.response_status = response.status();

    match logger.log(&ctx).await {
        Ok(_) => response,
        Err(err) if state.fail_on_error => {
            tracing::error!(error = %err, uri = %ctx.request_uri, "audit failed, rejecting request");
            GatewayError::Audit(err).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, uri = %ctx.request_uri, "failed to write audit record");
            response
        }
    }
}
