//! fxref core: reference-rate feed parsing and currency conversion.
//!
//! This crate contains:
//! - Domain types (ISO currency codes, currency rates, the daily rate table)
//! - A single-pass validating parser for the XML reference-rate feed
//! - Conversion arithmetic between any two currencies quoted against EUR
//! - Feed sources (HTTP, file, in-memory) and their TOML configuration
//! - A converter façade with blocking, callback and background delivery

pub mod converter;
pub mod domain;
pub mod feed;
pub mod latch;

pub use converter::{CurrencyConverter, FetchResult};
pub use domain::{CurrencyCode, CurrencyRate, ReferenceRates, UnknownCurrency};
pub use feed::{parse, parse_reader, FetchError, ParseError};
pub use latch::SettleOnce;
