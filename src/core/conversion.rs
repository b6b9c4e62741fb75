//! Pure price arithmetic over a rate snapshot.
use crate::core::rates::RateSnapshot;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Currency not found: {0}")]
    NotFound(String),

    #[error("Unusable price {price} for {currency}")]
    UnusablePrice { currency: String, price: f64 },
}

/// Effective BTC price of `currency`, looked up case-insensitively.
pub fn price_of(snapshot: &RateSnapshot, currency: &str) -> Result<f64, LookupError> {
    snapshot
        .get(currency)
        .map(|quote| quote.effective_price())
        .ok_or_else(|| LookupError::NotFound(currency.to_uppercase()))
}

/// Like [`price_of`], but rejects prices that cannot be divided by or
/// multiplied into a meaningful amount.
pub fn usable_price_of(snapshot: &RateSnapshot, currency: &str) -> Result<f64, LookupError> {
    let price = price_of(snapshot, currency)?;
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(LookupError::UnusablePrice {
            currency: currency.to_uppercase(),
            price,
        })
    }
}

/// Converts a fiat amount into BTC.
pub fn to_btc(snapshot: &RateSnapshot, currency: &str, fiat_amount: f64) -> Result<f64, LookupError> {
    let price = usable_price_of(snapshot, currency)?;
    finite(fiat_amount / price, currency, price)
}

/// Converts a BTC amount into fiat.
pub fn to_fiat(snapshot: &RateSnapshot, currency: &str, btc_amount: f64) -> Result<f64, LookupError> {
    let price = usable_price_of(snapshot, currency)?;
    finite(btc_amount * price, currency, price)
}

fn finite(value: f64, currency: &str, price: f64) -> Result<f64, LookupError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LookupError::UnusablePrice {
            currency: currency.to_uppercase(),
            price,
        })
    }
}

/// Applies the markup to `base`, rounded to four decimal places.
///
/// The result is not finite when the marked-up value overflows.
pub fn spot_price(base: f64, markup_percent: f64) -> f64 {
    round_to(base * (1.0 + markup_percent / 100.0), 4)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        // Already beyond the precision of the requested places.
        value
    }
}
