//! Rate snapshot types and the source abstraction that supplies them

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Price data for one currency as reported by the ticker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    /// Fifteen minute delayed market price.
    pub short_window: Option<f64>,
    /// Most recent trade price.
    pub last: f64,
}

impl PriceQuote {
    pub fn new(short_window: Option<f64>, last: f64) -> Self {
        Self { short_window, last }
    }

    /// Price used for every computation: the short window price when the
    /// ticker reported one, the last trade otherwise.
    pub fn effective_price(&self) -> f64 {
        self.short_window.unwrap_or(self.last)
    }
}

/// Point-in-time table of currency code to BTC price.
///
/// Codes are stored uppercase, so lookups are case-insensitive and listing
/// is sorted without duplicates. There are no mutating methods once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSnapshot {
    quotes: BTreeMap<String, PriceQuote>,
    fetched_at: Option<DateTime<Utc>>,
}

impl RateSnapshot {
    pub fn new<I, K>(quotes: I) -> Self
    where
        I: IntoIterator<Item = (K, PriceQuote)>,
        K: AsRef<str>,
    {
        let quotes = quotes
            .into_iter()
            .map(|(code, quote)| (code.as_ref().trim().to_uppercase(), quote))
            .filter(|(code, _)| !code.is_empty())
            .collect();
        Self {
            quotes,
            fetched_at: None,
        }
    }

    pub fn with_fetched_at(mut self, at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(at);
        self
    }

    pub fn get(&self, currency: &str) -> Option<&PriceQuote> {
        self.quotes.get(&currency.trim().to_uppercase())
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.get(currency).is_some()
    }

    /// Sorted, de-duplicated currency codes.
    pub fn currencies(&self) -> Vec<String> {
        self.quotes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<RateSnapshot>;
}
