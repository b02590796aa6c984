// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Errors raised by the organizer core.
///
/// Validation problems on a draft are not errors, they are reported as
/// [`FormErrors`](crate::FormErrors).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dotted path does not name a field of the event draft.
    #[error("Unknown field path: {0}")]
    UnknownField(String),

    /// The value cannot be stored in the addressed field.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// A list index does not exist.
    #[error("Index {index} is out of range for {field} (length {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    /// The operation would break a draft invariant.
    #[error("{0}")]
    Refused(String),

    /// The event photo was rejected.
    #[error("{0}")]
    Photo(String),

    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local storage failure.
    #[error("Local storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A stored value is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid(field: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
