//! CoinGecko market data feed

use crate::error::Result;
use crate::market::{Candle, MarketFeed};
use async_trait::async_trait;
use chrono::TimeZone;
use reqwest::Client;
use std::collections::HashMap;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko feed implementation
pub struct CoinGeckoFeed {
    client: Client,
    base_url: String,
}

impl CoinGeckoFeed {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub(crate) fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }
}

impl Default for CoinGeckoFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketFeed for CoinGeckoFeed {
    async fn spot_prices(&self, symbols: &[&str]) -> Result<HashMap<String, f64>> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd",
            self.base_url,
            symbols.join(",")
        );

        let response: HashMap<String, HashMap<String, f64>> =
            self.client.get(url).send().await?.json().await?;

        Ok(parse_spot_response(response))
    }

    async fn ohlc_history(&self, symbol: &str, days: u32) -> Result<Vec<Candle>> {
        let url = format!(
            "{}/coins/{}/ohlc?vs_currency=usd&days={}",
            self.base_url, symbol, days
        );

        let response: Vec<[f64; 5]> = self.client.get(url).send().await?.json().await?;

        Ok(parse_ohlc_response(&response))
    }
}

fn parse_spot_response(response: HashMap<String, HashMap<String, f64>>) -> HashMap<String, f64> {
    response
        .into_iter()
        .filter_map(|(symbol, quotes)| quotes.get("usd").map(|price| (symbol, *price)))
        .collect()
}

fn parse_ohlc_response(rows: &[[f64; 5]]) -> Vec<Candle> {
    rows.iter()
        .filter_map(|row| {
            // CoinGecko timestamps are in milliseconds
            let time = chrono::Utc.timestamp_millis_opt(row[0] as i64).single()?;
            Some(Candle {
                time,
                open: row[1],
                high: row[2],
                low: row[3],
                close: row[4],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serve one canned JSON response on an ephemeral local port
    async fn serve_once(body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_spot_prices_over_http() {
        let base = serve_once(r#"{"bitcoin":{"usd":50000.0},"ethereum":{"usd":2000.5}}"#).await;
        let feed = CoinGeckoFeed::with_base_url(&base);

        let prices = feed.spot_prices(&["bitcoin", "ethereum"]).await.unwrap();
        assert_eq!(prices.get("bitcoin"), Some(&50_000.0));
        assert_eq!(prices.get("ethereum"), Some(&2_000.5));
    }

    #[tokio::test]
    async fn test_ohlc_history_over_http() {
        let base = serve_once(r#"[[1700000000000, 100.0, 110.0, 95.0, 105.0]]"#).await;
        let feed = CoinGeckoFeed::with_base_url(&base);

        let candles = feed.ohlc_history("bitcoin", 1).await.unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].open, 100.0);
        assert_eq!(candles[0].close, 105.0);
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_as_error() {
        // Nothing is listening here; the feed reports the failure instead
        // of inventing a price
        let feed = CoinGeckoFeed::with_base_url("http://127.0.0.1:1");
        assert!(feed.spot_prices(&["bitcoin"]).await.is_err());
    }

    #[test]
    fn test_parse_spot_response() {
        let raw = r#"{"bitcoin":{"usd":50000.0},"ethereum":{"usd":2000.5},"ripple":{}}"#;
        let response: HashMap<String, HashMap<String, f64>> =
            serde_json::from_str(raw).unwrap();

        let prices = parse_spot_response(response);
        assert_eq!(prices.get("bitcoin"), Some(&50_000.0));
        assert_eq!(prices.get("ethereum"), Some(&2_000.5));
        // No usd quote means no price, not a zero price
        assert_eq!(prices.get("ripple"), None);
    }

    #[test]
    fn test_parse_ohlc_response() {
        let raw = r#"[[1700000000000, 100.0, 110.0, 95.0, 105.0],
                      [1700001800000, 105.0, 108.0, 101.0, 102.5]]"#;
        let rows: Vec<[f64; 5]> = serde_json::from_str(raw).unwrap();

        let candles = parse_ohlc_response(&rows);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].open, 100.0);
        assert_eq!(candles[0].close, 105.0);
        assert_eq!(candles[1].high, 108.0);
        assert!(candles[1].time > candles[0].time);
    }
}
