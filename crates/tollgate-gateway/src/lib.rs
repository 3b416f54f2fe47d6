//! # tollgate-gateway
//!
//! Axum middleware that wraps every request in the Tollgate cycle:
//!
//! 1. `PUT`/`POST` bodies are buffered up to the configured `body.max_bytes`
//!    and decoded without consuming them. Handlers read the normalized body
//!    from the [`DecodedRequestBody`] extension and can still extract the raw
//!    bytes. Larger bodies are answered with 422.
//! 2. The inner service runs.
//! 3. An audit record is built from the request, the response and the
//!    decoded body, and written to the configured sink.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::{Router, routing::post};
//! use tollgate_core::TollgateConfig;
//! use tollgate_gateway::{GatewayState, audited};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TollgateConfig::from_file("tollgate.yaml")?;
//! let state = Arc::new(GatewayState::from_config(&config)?);
//!
//! let app = audited(Router::new().route("/v1/things", post(|| async { "ok" })), state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(
//!     listener,
//!     app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod middleware;
pub mod state;

pub use error::GatewayError;
pub use middleware::{DecodedRequestBody, audit_requests, audited};
pub use state::GatewayState;
