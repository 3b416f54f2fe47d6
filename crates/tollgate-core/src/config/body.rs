//! Request body decoding configuration.

use serde::{Deserialize, Serialize};

/// Default body byte budget: 2 MiB plus one sentinel byte.
///
/// Reading the sentinel means the body was larger than 2 MiB.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 2 * 1024 * 1024 + 1;

/// Configuration for request body decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Body byte budget, sentinel byte included. Enforced by the consuming
    /// decode path and by the gateway while buffering; a body of
    /// `max_bytes - 1` bytes is the largest accepted.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_BODY_BYTES
}
