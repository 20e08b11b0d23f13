//! Domain types for reference rates

pub mod currency;
pub mod rate;
pub mod reference_rates;

pub use currency::{CurrencyCode, UnknownCurrency};
pub use rate::CurrencyRate;
pub use reference_rates::{is_feed_date, ReferenceRates};
