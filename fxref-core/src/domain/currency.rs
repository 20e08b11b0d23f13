//! ISO 4217 alphabetic currency codes.
//!
//! The recognized set is the active ISO 4217 list plus the retired codes the
//! reference-rate feed has carried in the past (e.g. HRK before 2023).
//! `XXX` (no currency) and `XTS` (testing) are deliberately absent.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sorted so lookups can binary search.
const ISO_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD",
    "BDT", "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV", "BRL", "BSD", "BTN", "BWP",
    "BYN", "BYR", "BZD", "CAD", "CDF", "CHE", "CHF", "CHW", "CLF", "CLP", "CNY", "COP",
    "COU", "CRC", "CUC", "CUP", "CVE", "CYP", "CZK", "DJF", "DKK", "DOP", "DZD", "EEK",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GNF",
    "GTQ", "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR",
    "ISK", "JMD", "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD",
    "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "LTL", "LVL", "LYD", "MAD", "MDL", "MGA",
    "MKD", "MMK", "MNT", "MOP", "MRO", "MRU", "MTL", "MUR", "MVR", "MWK", "MXN", "MXV",
    "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB", "PEN", "PGK",
    "PHP", "PKR", "PLN", "PYG", "QAR", "ROL", "RON", "RSD", "RUB", "RWF", "SAR", "SBD",
    "SCR", "SDG", "SEK", "SGD", "SHP", "SIT", "SKK", "SLE", "SLL", "SOS", "SRD", "SSP",
    "STD", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP", "TRL", "TRY",
    "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "USN", "UYI", "UYU", "UYW", "UZS", "VED",
    "VEF", "VES", "VND", "VUV", "WST", "XAF", "XAG", "XAU", "XBA", "XBB", "XBC", "XBD",
    "XCD", "XCG", "XDR", "XOF", "XPD", "XPF", "XPT", "XSU", "XUA", "YER", "ZAR", "ZMK",
    "ZMW", "ZWG", "ZWL",
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized ISO 4217 currency code: '{0}'")]
pub struct UnknownCurrency(pub String);

/// A recognized ISO 4217 currency code.
///
/// Backed by the static code table, so it is `Copy` and compares by value.
/// Parsing is exact: `"usd"` and `" USD"` are not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct CurrencyCode(&'static str);

impl CurrencyCode {
    /// The euro, the feed's anchor currency.
    pub const EUR: Self = Self("EUR");

    pub fn parse(code: &str) -> Result<Self, UnknownCurrency> {
        ISO_CODES
            .binary_search(&code)
            .map(|index| Self(ISO_CODES[index]))
            .map_err(|_| UnknownCurrency(code.to_string()))
    }

    /// Whether `code` is in the recognized set.
    pub fn is_recognized(code: &str) -> bool {
        ISO_CODES.binary_search(&code).is_ok()
    }

    /// Every recognized code, in alphabetical order.
    pub fn all() -> impl Iterator<Item = CurrencyCode> {
        ISO_CODES.iter().map(|&code| Self(code))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = UnknownCurrency;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::parse(&code).map_err(serde::de::Error::custom)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0.to_string()
    }
}

impl PartialEq<str> for CurrencyCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CurrencyCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        for pair in ISO_CODES.windows(2) {
            assert!(pair[0] < pair[1], "{} must sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn recognizes_feed_currencies() {
        for code in ["USD", "JPY", "BGN", "HRK", "ZAR", "EUR"] {
            assert!(CurrencyCode::is_recognized(code), "{code} should be recognized");
        }
    }

    #[test]
    fn rejects_placeholder_and_malformed_codes() {
        for code in ["XXX", "XTS", "usd", " USD", "US", "USDT", ""] {
            assert!(CurrencyCode::parse(code).is_err(), "{code:?} should be rejected");
        }
    }

    #[test]
    fn parse_returns_table_entry() {
        let code: CurrencyCode = "GBP".parse().unwrap();
        assert_eq!(code.as_str(), "GBP");
        assert_eq!(code, "GBP");
        assert_eq!(code.to_string(), "GBP");
    }

    #[test]
    fn serde_revalidates() {
        let json = serde_json::to_string(&CurrencyCode::EUR).unwrap();
        assert_eq!(json, "\"EUR\"");
        assert!(serde_json::from_str::<CurrencyCode>("\"XXX\"").is_err());
    }

    #[test]
    fn deserializes_from_owned_input() {
        // Owned input, so the code can't borrow from it.
        let json = String::from("[\"JPY\",\"USD\"]");
        let codes: Vec<CurrencyCode> = serde_json::from_reader(json.as_bytes()).unwrap();
        assert_eq!(codes, vec!["JPY", "USD"]);

        let err = serde_json::from_str::<CurrencyCode>("\"usd\"").unwrap_err();
        assert!(err.to_string().contains("usd"), "{err}");
    }

    #[test]
    fn all_enumerates_the_table() {
        assert_eq!(CurrencyCode::all().count(), ISO_CODES.len());
        assert!(CurrencyCode::all().any(|c| c == CurrencyCode::EUR));
    }
}
