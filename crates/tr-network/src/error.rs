//! Network and routing error type.

use thiserror::Error;

/// Errors produced by `tr-network`.
///
/// All variants are recoverable: a failed mutation leaves the network
/// unchanged and a failed query only discards its own scratch state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("node {0:?} not found in network")]
    UnknownNode(String),

    #[error("source and destination are both {0:?}; no route needed")]
    TrivialRoute(String),

    #[error("no route from {from:?} to {to:?}")]
    NoPathFound { from: String, to: String },

    #[error("no road from {from:?} to {to:?}")]
    RoadNotFound { from: String, to: String },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
