//! Feed retrieval and parsing

pub mod config;
pub mod error;
pub mod http;
pub mod parser;
pub mod source;

pub use config::{Config, FeedConfig, DEFAULT_FEED_URL};
pub use error::{FeedAttribute, FetchError, ParseError};
pub use http::HttpFeedSource;
pub use parser::{parse, parse_reader};
pub use source::{BytesFeedSource, FeedSource, FileFeedSource};
