//! The parsed reference-rate table and its conversion arithmetic.
//!
//! Every stored rate is quoted against the anchor currency (EUR), which is
//! implicit at 1.0 and never stored. Conversions between two non-anchor
//! currencies go through the anchor: `amount * rate(to) / rate(from)`.

use super::currency::CurrencyCode;
use super::rate::CurrencyRate;
use crate::feed::{FeedAttribute, ParseError};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// `true` when `value` has the feed's `YYYY-MM-DD` shape (ASCII digits only).
pub fn is_feed_date(value: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static date pattern"))
        .is_match(value)
}

/// Reference rates published for one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UncheckedRates")]
pub struct ReferenceRates {
    date: String,
    rates: Vec<CurrencyRate>,
}

#[derive(Deserialize)]
struct UncheckedRates {
    date: String,
    rates: Vec<CurrencyRate>,
}

impl TryFrom<UncheckedRates> for ReferenceRates {
    type Error = ParseError;

    fn try_from(value: UncheckedRates) -> Result<Self, Self::Error> {
        Self::new(value.date, value.rates)
    }
}

impl ReferenceRates {
    pub const ANCHOR: CurrencyCode = CurrencyCode::EUR;

    /// Build a table, enforcing the date shape and the implicit-anchor rule.
    pub fn new(date: impl Into<String>, rates: Vec<CurrencyRate>) -> Result<Self, ParseError> {
        let date = date.into();
        if !is_feed_date(&date) {
            return Err(ParseError::Value {
                attribute: FeedAttribute::Time,
                value: date,
            });
        }
        if rates.iter().any(|r| r.currency() == Self::ANCHOR) {
            return Err(ParseError::Value {
                attribute: FeedAttribute::Currency,
                value: Self::ANCHOR.to_string(),
            });
        }
        Ok(Self { date, rates })
    }

    /// Parser output is already validated field by field.
    pub(crate) fn from_validated(date: String, rates: Vec<CurrencyRate>) -> Self {
        Self { date, rates }
    }

    /// Publication date as printed in the feed, e.g. `2021-05-07`.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Publication date as a calendar date. `None` for pattern-valid strings
    /// that name no real day, like `2021-02-30`.
    pub fn publication_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Stored entries in document order.
    pub fn rates(&self) -> &[CurrencyRate] {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Stored rate for `code` against the anchor. The first entry wins when
    /// the feed repeats a currency.
    pub fn rate_for(&self, code: CurrencyCode) -> Option<f64> {
        self.rates
            .iter()
            .find(|r| r.currency() == code)
            .map(|r| r.rate())
    }

    /// Convert `amount` of `from` into `to`.
    ///
    /// Identical codes return `amount` untouched, even when the code is not a
    /// recognized currency. Otherwise `None` when either code is unrecognized
    /// or the table has no usable rate for the pair.
    pub fn pair_rate(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        if from == to {
            return Some(amount);
        }
        let from = CurrencyCode::parse(from).ok()?;
        let to = CurrencyCode::parse(to).ok()?;
        self.convert(amount, from, to)
    }

    /// Typed form of [`pair_rate`](Self::pair_rate).
    pub fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> Option<f64> {
        if from == to {
            return Some(amount);
        }
        if from == Self::ANCHOR {
            return self.rate_for(to).map(|rate| amount * rate);
        }

        // A zero divisor means no usable quote, not infinity.
        let from_rate = self.rate_for(from).filter(|rate| *rate != 0.0)?;
        if to == Self::ANCHOR {
            return Some(amount / from_rate);
        }

        let to_rate = self.rate_for(to)?;
        Some(amount * (to_rate / from_rate))
    }

    /// The whole table re-expressed against `base`, scaled by `amount`.
    ///
    /// Empty when `base` is unrecognized. For the anchor itself the stored
    /// entries come back as they are, without scaling.
    pub fn rebased_rates(&self, amount: f64, base: &str) -> Vec<CurrencyRate> {
        match CurrencyCode::parse(base) {
            Ok(base) => self.rebase(amount, base),
            Err(_) => Vec::new(),
        }
    }

    /// Typed form of [`rebased_rates`](Self::rebased_rates).
    ///
    /// Stored entries for currencies other than `base` are converted in
    /// document order; entries without a usable rate are dropped. The anchor
    /// is appended last at the unscaled `base -> EUR` rate.
    pub fn rebase(&self, amount: f64, base: CurrencyCode) -> Vec<CurrencyRate> {
        if base == Self::ANCHOR {
            return self.rates.clone();
        }

        let mut rebased: Vec<CurrencyRate> = self
            .rates
            .iter()
            .filter(|r| r.currency() != base)
            .filter_map(|r| {
                self.convert(amount, base, r.currency())
                    .map(|rate| CurrencyRate::new(r.currency(), rate))
            })
            .collect();

        if let Some(rate) = self.convert(1.0, base, Self::ANCHOR) {
            rebased.push(CurrencyRate::new(Self::ANCHOR, rate));
        }

        rebased
    }
}
