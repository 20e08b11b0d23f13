use super::currency::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A currency paired with its rate against an implicit base currency.
///
/// Equality and hashing compare the rate bit-for-bit (`f64::total_cmp`), so
/// the type can live in hash sets without violating the `Eq`/`Hash` contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurrencyRate {
    currency: CurrencyCode,
    rate: f64,
}

impl CurrencyRate {
    pub fn new(currency: CurrencyCode, rate: f64) -> Self {
        Self { currency, rate }
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl PartialEq for CurrencyRate {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.rate.total_cmp(&other.rate).is_eq()
    }
}

impl Eq for CurrencyRate {}

impl Hash for CurrencyRate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.currency.hash(state);
        self.rate.to_bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[test]
    fn equal_values_hash_together() {
        let mut set = HashSet::new();
        set.insert(CurrencyRate::new(code("USD"), 1.2059));
        set.insert(CurrencyRate::new(code("USD"), 1.2059));
        set.insert(CurrencyRate::new(code("USD"), 1.2060));
        set.insert(CurrencyRate::new(code("JPY"), 1.2059));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn serializes_as_plain_record() {
        let rate = CurrencyRate::new(code("JPY"), 131.76);
        let json = serde_json::to_string(&rate).unwrap();
        assert_eq!(json, r#"{"currency":"JPY","rate":131.76}"#);

        let back: CurrencyRate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rate);
    }

    #[test]
    fn deserialize_rejects_unknown_currency() {
        let err = serde_json::from_str::<CurrencyRate>(r#"{"currency":"XXX","rate":1.0}"#);
        assert!(err.is_err());
    }
}
