//! Fetch-and-parse façade over a feed source.
//!
//! `fetch` is the plain blocking call. `fetch_with` reports through a
//! completion callback that runs exactly once, `fetch_into` settles a latch
//! shared by competing fetches, and `spawn_fetch` runs the whole thing on a
//! worker thread and hands back a one-shot receiver.

use crate::domain::ReferenceRates;
use crate::feed::{self, BytesFeedSource, FeedConfig, FeedSource, FetchError, HttpFeedSource};
use crate::latch::SettleOnce;
use std::sync::{mpsc, Arc};
use tracing::debug;

pub type FetchResult = Result<ReferenceRates, FetchError>;

/// Retrieves the reference-rate feed and parses it into a table.
#[derive(Clone)]
pub struct CurrencyConverter {
    source: Arc<dyn FeedSource>,
}

impl CurrencyConverter {
    pub fn new(source: impl FeedSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Converter reading the live feed described by `config`.
    pub fn from_config(config: &FeedConfig) -> Result<Self, FetchError> {
        Ok(Self::new(HttpFeedSource::new(config)?))
    }

    /// Converter over a document already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(BytesFeedSource::new(bytes))
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch the document and parse it. Blocks the calling thread.
    pub fn fetch(&self) -> FetchResult {
        debug!(source = self.source.name(), "fetching reference rates");
        let bytes = self.source.fetch()?;
        Ok(feed::parse(&bytes)?)
    }

    /// Fetch and report the outcome to `completion`, which runs exactly once.
    pub fn fetch_with<F>(&self, completion: F)
    where
        F: FnOnce(FetchResult) + Send,
    {
        self.fetch_into(&SettleOnce::new(completion));
    }

    /// Fetch and settle a latch the caller may share with other fetches.
    ///
    /// When several converters race into one latch, only the first outcome
    /// reaches its callback. Returns `true` if this fetch was delivered.
    pub fn fetch_into(&self, latch: &SettleOnce<'_, FetchResult>) -> bool {
        let result = self.fetch();
        let delivered = latch.settle(result);
        if !delivered {
            debug!(source = self.source.name(), "result discarded, latch already settled");
        }
        delivered
    }

    /// Fetch on a background thread. The receiver yields a single result.
    pub fn spawn_fetch(&self) -> mpsc::Receiver<FetchResult> {
        let (tx, rx) = mpsc::sync_channel(1);
        let converter = self.clone();
        std::thread::spawn(move || {
            converter.fetch_with(move |result| {
                // The caller may have dropped the receiver; nothing to report to.
                let _ = tx.send(result);
            });
        });
        rx
    }
}

impl Default for CurrencyConverter {
    /// Converter for the default live feed.
    fn default() -> Self {
        let source = HttpFeedSource::new(&FeedConfig::default())
            .expect("default feed configuration is valid");
        Self::new(source)
    }
}

impl std::fmt::Debug for CurrencyConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyConverter")
            .field("source", &self.source.name())
            .finish()
    }
}
