use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Period, PriceTargets, Ticker, TimeSeries};

#[derive(Debug, Error)]
pub enum StockApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    /// The backend answered with an `{"error": ...}` object.
    #[error("backend error: {0}")]
    Api(String),
}

/// Backend serving price history and analyst targets for the stock detail
/// page.
#[async_trait]
pub trait StockDataSource: Send + Sync {
    /// `GET /stock/stock_chart/{ticker}?period={period}`
    async fn stock_chart(&self, ticker: &Ticker, period: Period) -> Result<TimeSeries, StockApiError>;

    /// `GET /stock/price_targets/{ticker}`
    async fn price_targets(&self, ticker: &Ticker) -> Result<PriceTargets, StockApiError>;
}

/// Either shape the backend may return. An object carrying `error` is a
/// failure whatever else it contains.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Failure { error: String },
    Success(T),
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<T, StockApiError> {
        match self {
            ApiEnvelope::Failure { error } => Err(StockApiError::Api(error)),
            ApiEnvelope::Success(value) => Ok(value),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StockChartBody {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

impl TryFrom<StockChartBody> for TimeSeries {
    type Error = StockApiError;

    fn try_from(body: StockChartBody) -> Result<Self, Self::Error> {
        TimeSeries::from_parallel(body.dates, body.prices)
            .map_err(|e| StockApiError::BadResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success() {
        let env: ApiEnvelope<StockChartBody> =
            serde_json::from_str(r#"{"dates": ["2024-01-02"], "prices": [185.6]}"#).unwrap();
        let series = TimeSeries::try_from(env.into_result().unwrap()).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_envelope_error_wins_over_data() {
        let env: ApiEnvelope<StockChartBody> =
            serde_json::from_str(r#"{"error": "No data for ticker", "dates": [], "prices": []}"#).unwrap();
        assert!(matches!(env.into_result(), Err(StockApiError::Api(msg)) if msg == "No data for ticker"));
    }

    #[test]
    fn test_mismatched_chart_body_is_bad_response() {
        let body = StockChartBody {
            dates: vec!["2024-01-02".into(), "2024-01-03".into()],
            prices: vec![1.0],
        };
        assert!(matches!(TimeSeries::try_from(body), Err(StockApiError::BadResponse(_))));
    }
}
