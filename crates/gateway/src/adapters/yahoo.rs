//! Yahoo Finance chart API adapter (Gateway In)
//!
//! `GET {base}/v8/finance/chart/{symbol}?period1=..&period2=..&interval=1d`
//! returns one result per symbol with parallel `timestamp` and
//! `indicators.quote[0].close` arrays. Days without a close are `null` and
//! are skipped.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;
use trendalert_ports::{DateWindow, IngestionError, PriceSource};

use crate::error::{GatewayError, describe};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    code: String,
    description: Option<String>,
}

/// Daily closes from the Yahoo Finance chart endpoint
#[derive(Clone)]
pub struct YahooPriceSource {
    client: Client,
    base_url: Url,
}

impl YahooPriceSource {
    pub fn new(client: Client, base_url: &str) -> Result<Self, GatewayError> {
        let base_url = parse_base_url(base_url)?;
        Ok(YahooPriceSource { client, base_url })
    }

    pub fn with_default_url(client: Client) -> Result<Self, GatewayError> {
        Self::new(client, DEFAULT_BASE_URL)
    }

    /// Chart endpoint for a symbol; the symbol is one escaped path segment
    fn chart_url(&self, symbol: &str) -> Result<Url, IngestionError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                IngestionError::Transport(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }

    async fn fetch(&self, symbol: &str, window: DateWindow) -> Result<Vec<f64>, IngestionError> {
        let url = self.chart_url(symbol)?;
        let query = [
            ("period1", unix_midnight(window.start).to_string()),
            // period2 is exclusive; include the end date's bar
            (
                "period2",
                unix_midnight(window.end.checked_add_days(Days::new(1)).unwrap_or(window.end))
                    .to_string(),
            ),
            ("interval", "1d".to_string()),
            ("events", "history".to_string()),
            ("includePrePost", "false".to_string()),
        ];

        debug!("Fetching {} closes for {}", symbol, window);

        let resp = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| IngestionError::Transport(describe(&e)))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| IngestionError::Transport(describe(&e)))?;

        match parse_chart(symbol, &text) {
            Ok(closes) if status.is_success() => Ok(closes),
            // An API error body explains the failure better than the status
            Err(err @ IngestionError::InvalidInstrument { .. }) => Err(err),
            Err(err) if status.is_success() => Err(err),
            _ => Err(IngestionError::Transport(format!(
                "HTTP {}: {}",
                status,
                truncate(&text, 200)
            ))),
        }
    }
}

#[async_trait]
impl PriceSource for YahooPriceSource {
    async fn daily_closes(
        &self,
        symbol: &str,
        window: DateWindow,
    ) -> Result<Vec<f64>, IngestionError> {
        self.fetch(symbol, window).await
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// Parse a provider base URL; only http(s) URLs that can take a path qualify
pub fn parse_base_url(base_url: &str) -> Result<Url, GatewayError> {
    let url =
        Url::parse(base_url).map_err(|e| GatewayError::InvalidUrl(format!("{base_url}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(GatewayError::InvalidUrl(format!(
            "{base_url}: expected an http(s) base URL"
        )));
    }
    Ok(url)
}

/// Parse a chart response body into closes, oldest first
pub fn parse_chart(symbol: &str, body: &str) -> Result<Vec<f64>, IngestionError> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).map_err(|e| IngestionError::Malformed(e.to_string()))?;

    if let Some(err) = envelope.chart.error {
        let reason = match err.description {
            Some(description) => format!("{}: {}", err.code, description),
            None => err.code.clone(),
        };
        return Err(if err.code.eq_ignore_ascii_case("Not Found") {
            IngestionError::InvalidInstrument {
                symbol: symbol.to_string(),
                reason,
            }
        } else {
            IngestionError::Malformed(reason)
        });
    }

    let closes: Vec<f64> = envelope
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|result| result.indicators.quote.into_iter().next())
        .map(|quote| {
            quote
                .close
                .into_iter()
                .flatten()
                .filter(|c| c.is_finite())
                .collect()
        })
        .unwrap_or_default();

    if closes.is_empty() {
        return Err(IngestionError::NoData {
            symbol: symbol.to_string(),
        });
    }

    Ok(closes)
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
