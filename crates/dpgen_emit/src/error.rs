//! Emission error types.
//!
//! Malformed operations are not errors here: they render an in-band
//! `/* ERROR: ... */` marker. Only the output sink can fail.

use std::io;

/// Errors that can occur while writing emitted text.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The underlying writer failed.
    #[error("emit I/O error: {0}")]
    Io(#[from] io::Error),
}
