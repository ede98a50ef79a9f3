//! Error types for the one fallible surface in this crate: PLY point-exchange I/O.
//!
//! The core tree operations never fail: empty-tree queries return `None` or an
//! empty `Vec`, malformed `construct` input yields an empty tree. See the
//! error handling design notes for the rationale.

use thiserror::Error;

/// Errors that can occur while reading or writing the PLY point-exchange format.
#[derive(Debug, Error)]
pub enum PlyError {
    /// An underlying I/O operation failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The file header did not match the expected PLY ASCII format.
    #[error("malformed ply header: {0}")]
    Header(String),

    /// Fewer records were present than the header's element count declared.
    #[error("truncated element block: expected {expected} records, found {found}")]
    Truncated { expected: usize, found: usize },

    /// A vertex or edge record could not be parsed as the expected number of
    /// whitespace-separated fields.
    #[error("malformed record: {0}")]
    Record(String),
}
