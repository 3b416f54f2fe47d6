//! # tollgate-core
//!
//! Configuration types shared across the Tollgate crates.
//!
//! Configuration is loaded from a single YAML file (usually `tollgate.yaml`)
//! into a [`TollgateConfig`]. The audit detail tier, [`AuditLevel`], also lives
//! here because both the config loader and the audit pipeline need it.

pub mod config;

pub use config::{
    AuditConfig, AuditLevel, AuditOutput, BodyConfig, ConfigError, TollgateConfig,
    DEFAULT_MAX_BODY_BYTES,
};
