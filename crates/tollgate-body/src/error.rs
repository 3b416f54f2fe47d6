//! Error types for body decoding.

use http::StatusCode;
use thiserror::Error;

/// Why a body could not be turned into a [`DecodedBody`](crate::DecodedBody).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed or truncated JSON, or JSON that is not an object.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Malformed YAML, or YAML that is not a mapping.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// The stream ended before any document started.
    #[error("EOF")]
    Empty,

    /// The bounded reader handed out its sentinel byte.
    #[error("request body is larger than {max} bytes")]
    TooLarge { max: u64 },
}

/// Errors surfaced to the request layer.
#[derive(Debug, Error)]
pub enum BodyError {
    /// The body could not be decoded.
    #[error("{message}")]
    InvalidBodyContent { message: String },

    /// The body could not be buffered.
    #[error("failed to read request body: {0}")]
    Io(#[from] std::io::Error),
}

impl BodyError {
    /// API error code for the response payload.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidBodyContent { .. } => "InvalidBodyContent",
            Self::Io(_) => "ServerError",
        }
    }

    /// HTTP status the request layer should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBodyContent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DecodeError> for BodyError {
    fn from(err: DecodeError) -> Self {
        Self::InvalidBodyContent {
            message: format!("Failed to parse body: {err}"),
        }
    }
}
