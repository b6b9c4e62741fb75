use super::util::with_retry;
use crate::core::config::BlockchainProviderConfig;
use crate::core::rates::{PriceQuote, RateSnapshot, RateSource};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

const RETRY_DELAY_MS: u64 = 250;

/// Rate source backed by the blockchain.info `/ticker` endpoint.
pub struct BlockchainTickerSource {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
}

impl BlockchainTickerSource {
    pub fn new(config: &BlockchainProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("smsbtc/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(BlockchainTickerSource {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retries: config.retries,
        })
    }
}

#[derive(Deserialize, Debug)]
struct TickerEntry {
    #[serde(rename = "15m")]
    fifteen_minutes: Option<f64>,
    last: Option<f64>,
}

#[async_trait]
impl RateSource for BlockchainTickerSource {
    #[instrument(name = "TickerFetch", skip(self), fields(base_url = %self.base_url))]
    async fn fetch_snapshot(&self) -> Result<RateSnapshot> {
        let url = format!("{}/ticker", self.base_url);
        debug!("Requesting ticker from {}", url);

        let client = &self.client;
        let text = with_retry(
            || async {
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

                if !response.status().is_success() {
                    return Err(anyhow!("HTTP error: {} for ticker", response.status()));
                }
                Ok(response.text().await?)
            },
            self.retries,
            RETRY_DELAY_MS,
        )
        .await?;

        let ticker: HashMap<String, TickerEntry> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse ticker response: {}", e))?;

        let snapshot = RateSnapshot::new(ticker.into_iter().map(|(code, entry)| {
            (
                code,
                PriceQuote::new(entry.fifteen_minutes, entry.last.unwrap_or_default()),
            )
        }))
        .with_fetched_at(Utc::now());

        debug!(currencies = snapshot.len(), "Received ticker");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_TICKER: &str = r#"{
        "USD": {"15m": 50000.0, "last": 49950.5, "buy": 49950.5, "sell": 49950.5, "symbol": "$"},
        "eur": {"15m": 46000.0, "last": 46010.0, "buy": 46010.0, "sell": 46010.0, "symbol": "€"},
        "GBP": {"last": 40000.0, "symbol": "£"}
    }"#;

    fn config(base_url: &str) -> BlockchainProviderConfig {
        BlockchainProviderConfig {
            base_url: base_url.to_string(),
            timeout_secs: 1,
            retries: 0,
        }
    }

    async fn create_mock_server(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticker"))
            .respond_with(template)
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_ticker_fetch() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(MOCK_TICKER)).await;
        let source = BlockchainTickerSource::new(&config(&mock_server.uri())).unwrap();

        let snapshot = source.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.currencies(), vec!["EUR", "GBP", "USD"]);
        assert_eq!(snapshot.get("usd").unwrap().effective_price(), 50000.0);
        assert_eq!(snapshot.get("EUR").unwrap().effective_price(), 46000.0);
        assert_eq!(snapshot.get("gbp").unwrap().effective_price(), 40000.0);
        assert!(snapshot.fetched_at().is_some());
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(MOCK_TICKER)).await;
        let base_url = format!("{}/", mock_server.uri());
        let source = BlockchainTickerSource::new(&config(&base_url)).unwrap();

        assert_eq!(source.fetch_snapshot().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server(ResponseTemplate::new(500)).await;
        let source = BlockchainTickerSource::new(&config(&mock_server.uri())).unwrap();

        let result = source.fetch_snapshot().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for ticker"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
                .await;
        let source = BlockchainTickerSource::new(&config(&mock_server.uri())).unwrap();

        let result = source.fetch_snapshot().await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse ticker response")
        );
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200)
                .set_body_string(MOCK_TICKER)
                .set_delay(Duration::from_secs(3)),
        )
        .await;
        let source = BlockchainTickerSource::new(&config(&mock_server.uri())).unwrap();

        let result = source.fetch_snapshot().await;
        assert!(result.unwrap_err().to_string().contains("Request error"));
    }

    #[tokio::test]
    async fn test_retry_recovers_from_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticker"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_TICKER))
            .mount(&mock_server)
            .await;

        let mut config = config(&mock_server.uri());
        config.retries = 1;
        let source = BlockchainTickerSource::new(&config).unwrap();

        assert_eq!(source.fetch_snapshot().await.unwrap().len(), 3);
    }
}
