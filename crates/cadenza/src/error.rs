//! Error types for Cadenza operations.
//!
//! Layout passes never fail: anomalies they meet are reported as
//! [`Diagnostic`](crate::diagnostic::Diagnostic)s. [`CadenzaError`] covers the
//! fallible edges of the crate, namely building a document tree and loading
//! configuration.

use std::io;

use thiserror::Error;

/// The main error type for Cadenza operations.
#[derive(Debug, Error)]
pub enum CadenzaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Structure error: {0}")]
    Structure(String),
}
