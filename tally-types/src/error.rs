use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tally workspace.
///
/// Every failure aborts the whole run; there is no partial output and no
/// recovery path, so variants only need to carry enough context for a
/// human-readable message.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TallyError {
    /// A date or value could not be parsed, or a value is not finite.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An expected column is absent from the source.
    #[error("missing column '{column}' in {origin}")]
    MissingColumn {
        /// Literal column name that was requested.
        column: String,
        /// Where the column was looked up (file path or source label).
        origin: String,
    },

    /// The operation needs at least one observation or bucket.
    #[error("empty input")]
    EmptyInput,

    /// Rolling window is not a positive odd integer.
    #[error("invalid window: {window} (must be a positive odd integer)")]
    InvalidWindow {
        /// The rejected window size.
        window: usize,
    },

    /// Invalid argument or incompatible combination of inputs.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {msg}")]
    Io {
        /// Path of the file involved.
        path: String,
        /// Underlying error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl TallyError {
    /// Helper: build a `MissingColumn` error.
    pub fn missing_column(column: impl Into<String>, origin: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            origin: origin.into(),
        }
    }

    /// Helper: build an `Io` error from a path and any displayable cause.
    pub fn io(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            msg: err.to_string(),
        }
    }

    /// Helper: build a `MalformedInput` error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Returns true if the error was caused by the input data rather than by
    /// how the run was configured.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput(_) | Self::MissingColumn { .. } | Self::EmptyInput
        )
    }
}
