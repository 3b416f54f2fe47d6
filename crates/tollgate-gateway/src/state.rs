//! Shared state of the gateway middleware.

use tollgate_audit::{AuditError, AuditLogger};
use tollgate_body::BodyDecoder;
use tollgate_core::TollgateConfig;

/// Read-only state shared by every request.
#[derive(Debug)]
pub struct GatewayState {
    pub logger: AuditLogger,
    pub decoder: BodyDecoder,
    /// Answer 500 when a record cannot be written instead of logging the
    /// failure and returning the handler's response.
    pub fail_on_error: bool,
}

impl GatewayState {
    pub fn new(logger: AuditLogger, decoder: BodyDecoder) -> Self {
        Self {
            logger,
            decoder,
            fail_on_error: false,
        }
    }

    /// Build the logger, its sink and the decoder from configuration.
    pub fn from_config(config: &TollgateConfig) -> Result<Self, AuditError> {
        let logger = AuditLogger::new(&config.audit)?;
        let decoder = BodyDecoder::from_config(&config.body);
        Ok(Self::new(logger, decoder).fail_on_error(config.audit.fail_on_error))
    }

    pub fn fail_on_error(mut self, fail_on_error: bool) -> Self {
        self.fail_on_error = fail_on_error;
        self
    }
}
