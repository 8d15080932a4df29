//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers parsing of the
//! closed catalogs in this crate and configuration validation.

use thiserror::Error;

/// Errors produced by `tr-core`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown road type {0:?}")]
    UnknownRoadType(String),

    #[error("unknown vehicle kind {0:?}")]
    UnknownVehicle(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
