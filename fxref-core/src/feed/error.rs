//! Structured error types for feed parsing and retrieval.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The feed attributes the parser validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedAttribute {
    Time,
    Rate,
    Currency,
}

impl FeedAttribute {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Rate => "rate",
            Self::Currency => "currency",
        }
    }
}

impl fmt::Display for FeedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a feed document did not produce a table.
///
/// A failed parse never yields a partial table alongside the error.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A recognized attribute carried a value that failed validation.
    #[error("unexpected {attribute} value: {value}")]
    Value {
        attribute: FeedAttribute,
        value: String,
    },

    /// The bytes are not well-formed XML.
    #[error("malformed feed document at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The document parsed but never named a publication date.
    #[error("{0}")]
    Failed(String),
}

impl ParseError {
    pub(crate) fn value(attribute: FeedAttribute, value: impl Into<String>) -> Self {
        Self::Value {
            attribute,
            value: value.into(),
        }
    }
}

/// Errors from fetching the feed bytes, plus parse failures downstream.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by feed host (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid feed configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
