//! Error types for OxiTar operations.
//!
//! Every fallible operation in the workspace returns [`OxiTarError`]. The
//! variants split into three groups: failures of the underlying byte source,
//! structural problems in a header block, and misuse of an entry reader
//! (closed, exhausted, bad seek).

use std::io;
use thiserror::Error;

/// Message carried by [`OxiTarError::CorruptArchive`] when a name field has
/// content after an embedded NUL terminator.
pub const NULL_BYTE_IN_NAME: &str = "tar is corrupt, name contains null byte";

/// The main error type for OxiTar operations.
#[derive(Debug, Error)]
pub enum OxiTarError {
    /// I/O error from the underlying byte source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Header fields violate structural assumptions of the tar format.
    #[error("{message}")]
    CorruptArchive {
        /// Description of the corruption.
        message: String,
    },

    /// Operation attempted on an entry reader that was closed.
    #[error("closed tar entry")]
    ClosedReader,

    /// Partial read requested more bytes but the entry is exhausted.
    #[error("end of tar entry reached")]
    EndOfEntry,

    /// The source ended before the entry's declared size.
    #[error("Unexpected end of file: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: u64,
    },

    /// Invalid header format.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Seek to a position before the start of the entry.
    #[error("Invalid seek: position {offset} is before the start of the entry")]
    InvalidSeek {
        /// The negative position that was requested.
        offset: i64,
    },
}

/// Result type alias for OxiTar operations.
pub type Result<T> = std::result::Result<T, OxiTarError>;

impl OxiTarError {
    /// Create a corrupt archive error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptArchive {
            message: message.into(),
        }
    }

    /// Create the corrupt archive error for an embedded NUL in a name field.
    pub fn null_byte_in_name() -> Self {
        Self::corrupt(NULL_BYTE_IN_NAME)
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: u64) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an invalid seek error.
    pub fn invalid_seek(offset: i64) -> Self {
        Self::InvalidSeek { offset }
    }

    /// Check whether this error is the strict end-of-entry signal.
    pub fn is_end_of_entry(&self) -> bool {
        matches!(self, Self::EndOfEntry)
    }
}

impl From<OxiTarError> for io::Error {
    fn from(err: OxiTarError) -> Self {
        match err {
            OxiTarError::Io(inner) => inner,
            other => {
                let kind = match &other {
                    OxiTarError::ClosedReader | OxiTarError::InvalidSeek { .. } => {
                        io::ErrorKind::InvalidInput
                    }
                    OxiTarError::EndOfEntry | OxiTarError::UnexpectedEof { .. } => {
                        io::ErrorKind::UnexpectedEof
                    }
                    _ => io::ErrorKind::InvalidData,
                };
                io::Error::new(kind, other)
            }
        }
    }
}
