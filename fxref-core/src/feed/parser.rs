//! Single-pass parser for the reference-rate XML feed.
//!
//! The feed nests its data in attributes:
//!
//! ```text
//! <gesmes:Envelope ...>
//!   <gesmes:subject>Reference rates</gesmes:subject>
//!   <Cube>
//!     <Cube time="2021-05-07">
//!       <Cube currency="USD" rate="1.2059"/>
//!       ...
//! ```
//!
//! Only the `time`, `currency` and `rate` attributes are recognized, on any
//! element. Everything else is skipped, so envelope and sender wrappers never
//! cause a failure. A recognized attribute with a bad value aborts the parse
//! at that element.

use super::error::{FeedAttribute, ParseError};
use crate::domain::{is_feed_date, CurrencyCode, CurrencyRate, ReferenceRates};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use tracing::{debug, info, warn};

/// Parse a complete feed document held in memory.
pub fn parse(bytes: &[u8]) -> Result<ReferenceRates, ParseError> {
    parse_reader(bytes)
}

/// Parse a feed document from any buffered byte stream.
pub fn parse_reader<R: BufRead>(source: R) -> Result<ReferenceRates, ParseError> {
    let result = read_document(source);
    match &result {
        Ok(table) => info!(date = table.date(), entries = table.len(), "parsed reference rates"),
        Err(e) => warn!(error = %e, "reference rate feed rejected"),
    }
    result
}

fn read_document<R: BufRead>(source: R) -> Result<ReferenceRates, ParseError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut acc = RateAccumulator::default();
    let mut depth = 0usize;
    let mut saw_element = false;
    let mut root_closed = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| syntax(reader.buffer_position(), source))?;
        let position = reader.buffer_position();

        match event {
            Event::Start(ref element) => {
                reject_after_root(root_closed, position, "element")?;
                depth += 1;
                saw_element = true;
                acc.visit(element, position)?;
            }
            Event::Empty(ref element) => {
                reject_after_root(root_closed, position, "element")?;
                saw_element = true;
                root_closed = depth == 0;
                acc.visit(element, position)?;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
            }
            Event::Text(ref text) if text.iter().any(|b| !b.is_ascii_whitespace()) => {
                reject_after_root(root_closed, position, "text")?;
            }
            Event::CData(_) => reject_after_root(root_closed, position, "CDATA")?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let position = reader.buffer_position();
    if !saw_element {
        return Err(syntax(
            position,
            quick_xml::Error::UnexpectedEof("document has no root element".into()),
        ));
    }
    if depth > 0 {
        return Err(syntax(
            position,
            quick_xml::Error::UnexpectedEof(format!("{depth} element(s) left open")),
        ));
    }

    acc.finish()
}

/// A document has exactly one root; only whitespace, comments and
/// processing instructions may follow it.
fn reject_after_root(root_closed: bool, position: usize, what: &str) -> Result<(), ParseError> {
    if root_closed {
        return Err(syntax(
            position,
            quick_xml::Error::UnexpectedToken(format!("{what} after the root element")),
        ));
    }
    Ok(())
}

fn syntax(position: usize, source: quick_xml::Error) -> ParseError {
    ParseError::Syntax {
        position: position as u64,
        source,
    }
}

/// Per-call parse state. Discarded, never exposed, when the parse fails.
#[derive(Debug, Default)]
struct RateAccumulator {
    date: Option<String>,
    rates: Vec<CurrencyRate>,
}

/// The recognized attributes of one element, looked up by name.
#[derive(Default)]
struct RecognizedAttributes {
    time: Option<String>,
    rate: Option<String>,
    currency: Option<String>,
}

impl RateAccumulator {
    fn visit(&mut self, element: &BytesStart<'_>, position: usize) -> Result<(), ParseError> {
        let attrs = recognized_attributes(element, position)?;

        if let Some(time) = attrs.time {
            self.record_date(&time)?;
        }

        let rate = attrs.rate.map(|value| parse_rate(&value)).transpose()?;
        let currency = attrs
            .currency
            .map(|value| {
                CurrencyCode::parse(&value)
                    .map_err(|unknown| ParseError::value(FeedAttribute::Currency, unknown.0))
            })
            .transpose()?;

        if let (Some(currency), Some(rate)) = (currency, rate) {
            if currency == ReferenceRates::ANCHOR {
                warn!(rate, "skipping explicit entry for the anchor currency");
            } else {
                debug!(%currency, rate, "rate entry");
                self.rates.push(CurrencyRate::new(currency, rate));
            }
        }
        Ok(())
    }

    fn record_date(&mut self, value: &str) -> Result<(), ParseError> {
        if !is_feed_date(value) {
            return Err(ParseError::value(FeedAttribute::Time, value));
        }
        match self.date.as_deref() {
            None => self.date = Some(value.to_string()),
            Some(first) if first != value => {
                warn!(first, ignored = value, "feed repeats time with a different value");
            }
            Some(_) => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<ReferenceRates, ParseError> {
        match self.date {
            Some(date) => Ok(ReferenceRates::from_validated(date, self.rates)),
            None => Err(ParseError::Failed("parse failed".into())),
        }
    }
}

fn recognized_attributes(
    element: &BytesStart<'_>,
    position: usize,
) -> Result<RecognizedAttributes, ParseError> {
    let mut found = RecognizedAttributes::default();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| syntax(position, e.into()))?;
        let slot = match attr.key.as_ref() {
            b"time" => &mut found.time,
            b"rate" => &mut found.rate,
            b"currency" => &mut found.currency,
            _ => continue,
        };
        let value = attr.unescape_value().map_err(|e| syntax(position, e))?;
        slot.get_or_insert_with(|| value.into_owned());
    }
    Ok(found)
}

fn parse_rate(value: &str) -> Result<f64, ParseError> {
    match value.parse::<f64>() {
        Ok(rate) if rate.is_finite() => Ok(rate),
        _ => Err(ParseError::value(FeedAttribute::Rate, value)),
    }
}
