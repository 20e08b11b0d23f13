//! Where feed bytes come from.
//!
//! The FeedSource trait abstracts over the origin of the document (HTTP,
//! a file on disk, bytes already in memory) so the converter can be pointed
//! at a fixture in tests and at the live feed otherwise.

use super::error::FetchError;
use std::path::{Path, PathBuf};

/// Trait for anything that can hand over a complete feed document.
pub trait FeedSource: Send + Sync {
    /// Human-readable name of this source, used in logs.
    fn name(&self) -> &str;

    /// Retrieve the raw document bytes.
    fn fetch(&self) -> Result<Vec<u8>, FetchError>;
}

/// A document already resident in memory.
#[derive(Debug, Clone)]
pub struct BytesFeedSource {
    bytes: Vec<u8>,
}

impl BytesFeedSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }
}

impl FeedSource for BytesFeedSource {
    fn name(&self) -> &str {
        "bytes"
    }

    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        Ok(self.bytes.clone())
    }
}

/// A document saved on disk, e.g. a previously downloaded feed.
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedSource for FileFeedSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        std::fs::read(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
