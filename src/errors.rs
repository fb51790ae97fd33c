use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

use crate::external::stock_api::StockApiError;

/// Errors raised while reading page payloads, building charts or talking to
/// the chart surface. Views log these and skip the affected chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("element '{0}' not found")]
    MissingElement(String),
    #[error("canvas '{0}' not found")]
    MissingCanvas(String),
    #[error("failed to parse payload '{id}': {source}")]
    Parse {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("no data for chart '{0}'")]
    EmptyData(String),
    #[error("unknown chart instance {0}")]
    UnknownChart(String),
    #[error(transparent)]
    StockApi(#[from] StockApiError),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors surfaced by the HTTP service.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found")]
    NotFound,
    #[error("External error: {0}")]
    External(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
        }
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}

impl From<ChartError> for AppError {
    fn from(value: ChartError) -> Self {
        match value {
            ChartError::StockApi(e) => AppError::External(e.to_string()),
            ChartError::UnknownChart(_) => AppError::NotFound,
            other => AppError::Validation(other.to_string()),
        }
    }
}
