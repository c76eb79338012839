//! Error types for MAT file decoding.
//!
//! This module provides the [`Error`] enum covering all failure modes when
//! decoding MAT files, along with a convenient [`Result`] type alias.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for MAT decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a MAT file.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from the underlying file system.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The MAT file could not be opened.
    #[error("Failed to open MAT file: {path}")]
    OpenFailed {
        /// Path to the file that could not be opened.
        path: PathBuf,
    },

    /// The file is not a MAT file or has a corrupted header.
    #[error("Invalid MAT file format: {reason}")]
    InvalidFormat {
        /// Description of the format error.
        reason: String,
    },

    /// The file is a MAT file this build cannot decode.
    #[error("Unsupported MAT file: {reason}")]
    UnsupportedFormat {
        /// Why the file cannot be decoded.
        reason: String,
    },

    /// A node is neither a group nor a dataset.
    #[error("Unsupported node kind '{kind}' at {path}")]
    UnsupportedNodeKind {
        /// Path of the offending node.
        path: String,
        /// Kind reported by the container.
        kind: String,
    },

    /// A reference inside a cell array points at nothing.
    #[error("Dangling reference {reference} in {path}")]
    DanglingReference {
        /// Path of the dataset holding the reference.
        path: String,
        /// Printable form of the reference.
        reference: String,
    },

    /// Structural nesting went past the configured limit.
    #[error("Maximum nesting depth {limit} exceeded at {path}")]
    MaxDepthExceeded {
        /// Path of the node where the limit was hit.
        path: String,
        /// The configured limit.
        limit: usize,
    },

    /// Element count does not match the declared shape.
    ///
    /// Raised internally when reshaping a cell array; callers fall back to
    /// the unreshaped sequence.
    #[error("Shape mismatch: expected {expected} elements, found {found}")]
    ShapeMismatch {
        /// Product of the declared shape.
        expected: usize,
        /// Number of elements actually present.
        found: usize,
    },

    /// A dataset's element type cannot be read as numbers.
    #[error("Unsupported element type '{found}' at {path}")]
    UnsupportedElementType {
        /// Path of the dataset.
        path: String,
        /// Description of the element type.
        found: String,
    },

    /// The container backend failed.
    #[error("Container error: {message}")]
    Container {
        /// Message from the backend.
        message: String,
    },

    /// The legacy (Level 5) decoder rejected the file.
    #[error("Legacy MAT decoding failed: {reason}")]
    Legacy {
        /// Message from the legacy decoder.
        reason: String,
    },
}

impl Error {
    /// Create an OpenFailed error for the given path.
    pub fn open_failed(path: impl Into<PathBuf>) -> Self {
        Self::OpenFailed { path: path.into() }
    }

    /// Create an InvalidFormat error with the given reason.
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedFormat error with the given reason.
    pub fn unsupported_format(reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedNodeKind error.
    pub fn unsupported_node(path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedNodeKind {
            path: path.into(),
            kind: kind.into(),
        }
    }

    /// Create a DanglingReference error.
    pub fn dangling(path: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::DanglingReference {
            path: path.into(),
            reference: reference.into(),
        }
    }

    /// Create a MaxDepthExceeded error.
    pub fn max_depth(path: impl Into<String>, limit: usize) -> Self {
        Self::MaxDepthExceeded {
            path: path.into(),
            limit,
        }
    }

    /// Create a ShapeMismatch error.
    pub const fn shape_mismatch(expected: usize, found: usize) -> Self {
        Self::ShapeMismatch { expected, found }
    }

    /// Create an UnsupportedElementType error.
    pub fn unsupported_element(path: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnsupportedElementType {
            path: path.into(),
            found: found.into(),
        }
    }

    /// Create a Container error.
    pub fn container(message: impl Into<String>) -> Self {
        Self::Container {
            message: message.into(),
        }
    }

    /// Create a Legacy error.
    pub fn legacy(reason: impl Into<String>) -> Self {
        Self::Legacy {
            reason: reason.into(),
        }
    }

    /// Whether this error means the file itself is structurally invalid.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ShapeMismatch { .. })
    }
}

#[cfg(feature = "hdf5")]
impl From<hdf5::Error> for Error {
    fn from(err: hdf5::Error) -> Self {
        Self::container(err.to_string())
    }
}
