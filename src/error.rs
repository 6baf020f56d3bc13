//! Error types for tree building

use std::fmt;
use std::io;

use thiserror::Error;

/// Why a consumed line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatReason {
    /// The line is not `<size><whitespace><path>`.
    Grammar,
    /// Walking up from the current node ran past the root without finding a parent.
    NoMatchingAncestor,
    /// The input contained no lines at all.
    Empty,
}

impl fmt::Display for FormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatReason::Grammar => f.write_str("expected '<size> <path>'"),
            FormatReason::NoMatchingAncestor => f.write_str("no parent directory listed for path"),
            FormatReason::Empty => f.write_str("input is empty"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input. `line` is the 1-based ordinal in consumption (reversed) order.
    #[error("format error at line {line} ({reason}): {content}")]
    Format {
        line: usize,
        content: String,
        reason: FormatReason,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn format(line: usize, content: &str, reason: FormatReason) -> Self {
        Error::Format {
            line,
            content: content.to_string(),
            reason,
        }
    }

    /// True for malformed-input errors, false for I/O failures.
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
