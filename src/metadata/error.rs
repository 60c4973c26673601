//! Metadata-specific error types.

use std::fmt;

use thiserror::Error;

/// Result type for metadata normalization.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Which raw row sequence an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Column,
    ForeignKey,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column => write!(f, "column"),
            Self::ForeignKey => write!(f, "foreign key"),
        }
    }
}

/// Errors raised while folding raw catalog rows into a schema model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    /// A required identifying field was empty.
    #[error("malformed {kind} row #{index}: missing required field '{field}'")]
    MalformedRow {
        kind: RowKind,
        index: usize,
        field: &'static str,
    },
}
