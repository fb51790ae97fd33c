use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ChartsConfig;
use crate::external::stock_api::{ApiEnvelope, StockApiError, StockChartBody, StockDataSource};
use crate::models::{Period, PriceTargets, Ticker, TimeSeries};

/// `StockDataSource` backed by the portfolio web backend over HTTP.
pub struct HttpStockApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpStockApi {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, StockApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StockApiError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ChartsConfig) -> Result<Self, StockApiError> {
        Self::new(config.stock_api_url.clone(), config.request_timeout)
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded
    /// on its own, so a ticker can never climb out of its route.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StockApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StockApiError::BadResponse(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Decodes the body whatever the status: the backend reports failures as
    /// `{"error": ...}` with a non-2xx code.
    async fn get_json<T: DeserializeOwned + Send>(&self, request: reqwest::RequestBuilder) -> Result<T, StockApiError> {
        let resp = request
            .send()
            .await
            .map_err(|e| StockApiError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| StockApiError::Network(e.to_string()))?;

        let envelope: ApiEnvelope<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(StockApiError::Parse(e.to_string())),
            Err(_) => return Err(StockApiError::BadResponse(format!("HTTP {}", status))),
        };

        envelope.into_result()
    }
}

#[async_trait]
impl StockDataSource for HttpStockApi {
    async fn stock_chart(&self, ticker: &Ticker, period: Period) -> Result<TimeSeries, StockApiError> {
        let url = self.endpoint(&["stock", "stock_chart", ticker.as_str()])?;
        tracing::debug!("Fetching {} history for {} from {}", period, ticker, url);

        let body: StockChartBody = self
            .get_json(self.client.get(url).query(&[("period", period.as_str())]))
            .await?;

        TimeSeries::try_from(body)
    }

    async fn price_targets(&self, ticker: &Ticker) -> Result<PriceTargets, StockApiError> {
        let url = self.endpoint(&["stock", "price_targets", ticker.as_str()])?;
        tracing::debug!("Fetching price targets for {} from {}", ticker, url);

        self.get_json(self.client.get(url)).await
    }
}
