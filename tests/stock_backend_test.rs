//! Stock detail charts against an in-process backend speaking the
//! `/stock/stock_chart` and `/stock/price_targets` contract.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use portfolio_charts::config::RefreshPolicy;
use portfolio_charts::external::{HttpStockApi, StockApiError, StockDataSource};
use portfolio_charts::models::{Period, Ticker};
use portfolio_charts::surface::InMemorySurface;
use portfolio_charts::views::stock_detail::{RefreshOutcome, StockDetailController};

async fn stock_chart(
    Path(ticker): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let period = params.get("period").cloned().unwrap_or_default();
    match (ticker.as_str(), period.as_str()) {
        ("AAPL", "1y") => (
            StatusCode::OK,
            Json(json!({"dates": ["2024-01-02", "2024-01-03", "2024-01-04"], "prices": [185.6, 184.2, 181.9]})),
        ),
        ("AAPL", "1mo") => (
            StatusCode::OK,
            Json(json!({"dates": ["2024-06-03", "2024-06-04"], "prices": [194.0, 194.4]})),
        ),
        ("AAPL", "5d") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Upstream quota exhausted"})),
        ),
        _ => (StatusCode::NOT_FOUND, Json(json!({"error": "No price data found"}))),
    }
}

async fn price_targets(Path(ticker): Path<String>) -> (StatusCode, Json<Value>) {
    match ticker.as_str() {
        "AAPL" => (
            StatusCode::OK,
            Json(json!({
                "target_low": 160.0,
                "target_mean": 210.5,
                "target_high": 250.0,
                "current_price_analyst": 194.4
            })),
        ),
        _ => (StatusCode::NOT_FOUND, Json(json!({"error": "No analyst coverage"}))),
    }
}

async fn spawn_backend() -> Url {
    let app = Router::new()
        .route("/stock/stock_chart/:ticker", get(stock_chart))
        .route("/stock/price_targets/:ticker", get(price_targets))
        .route("/html/stock/stock_chart/:ticker", get(|| async { "<html>oops</html>" }));

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{}/", addr)).unwrap()
}

fn ticker(raw: &str) -> Ticker {
    Ticker::parse(raw).unwrap()
}

#[tokio::test]
async fn test_http_client_decodes_history_and_targets() {
    let api = HttpStockApi::new(spawn_backend().await, Duration::from_secs(5)).unwrap();

    let series = api.stock_chart(&ticker("AAPL"), Period::OneYear).await.unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.dates()[0], "2024-01-02");

    let targets = api.price_targets(&ticker("AAPL")).await.unwrap();
    assert_eq!(targets.target_mean, Some(210.5));
    assert_eq!(targets.current_price, Some(194.4));
}

#[tokio::test]
async fn test_http_client_reports_error_shaped_responses() {
    let api = HttpStockApi::new(spawn_backend().await, Duration::from_secs(5)).unwrap();

    let err = api.stock_chart(&ticker("AAPL"), Period::FiveDays).await.unwrap_err();
    assert!(matches!(err, StockApiError::Api(msg) if msg == "Upstream quota exhausted"));

    let err = api.price_targets(&ticker("ZZZZ")).await.unwrap_err();
    assert!(matches!(err, StockApiError::Api(_)));
}

#[tokio::test]
async fn test_http_client_non_json_body_is_parse_error() {
    let base = spawn_backend().await.join("html/").unwrap();
    let api = HttpStockApi::new(base, Duration::from_secs(5)).unwrap();

    // 200 with an HTML body
    let err = api.stock_chart(&ticker("AAPL"), Period::OneYear).await.unwrap_err();
    assert!(matches!(err, StockApiError::Parse(_)));

    // 404 with an empty body
    let err = api.price_targets(&ticker("AAPL")).await.unwrap_err();
    assert!(matches!(err, StockApiError::BadResponse(msg) if msg.contains("404")));
}

#[tokio::test]
async fn test_controller_refresh_cycle_over_http() {
    let api = HttpStockApi::new(spawn_backend().await, Duration::from_secs(5)).unwrap();
    let surface = InMemorySurface::new();
    let controller = StockDetailController::new(
        ticker("aapl"),
        Arc::new(api),
        Arc::new(surface.clone()),
        RefreshPolicy::LastResponseWins,
    );

    let (price, targets) = controller.initialize(Period::OneYear).await;
    assert!(matches!(price, RefreshOutcome::Created(_)));
    assert!(matches!(targets, RefreshOutcome::Created(_)));

    let handle = controller.price_chart().unwrap();
    assert!(matches!(controller.on_period_change(Period::OneMonth).await, RefreshOutcome::Updated(h) if h == handle));
    let after_update = surface.get(&handle).unwrap();
    assert_eq!(after_update.revision, 1);
    assert_eq!(after_update.config.data.labels, vec!["2024-06-03", "2024-06-04"]);

    // Error-shaped response: chart keeps the 1mo data.
    assert_eq!(controller.on_period_change(Period::FiveDays).await, RefreshOutcome::Failed);
    let after_failure = surface.get(&handle).unwrap();
    assert_eq!(after_failure.revision, 1);
    assert_eq!(after_failure.config.data, after_update.config.data);
}

#[tokio::test]
async fn test_unreachable_backend_renders_nothing() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = Url::parse(&format!("http://{}/", addr)).unwrap();
    let api = HttpStockApi::new(base, Duration::from_secs(2)).unwrap();
    let surface = InMemorySurface::new();
    let controller = StockDetailController::new(
        ticker("MSFT"),
        Arc::new(api),
        Arc::new(surface.clone()),
        RefreshPolicy::NewestRequestWins,
    );

    let (price, targets) = controller.initialize(Period::OneYear).await;
    assert_eq!(price, RefreshOutcome::Failed);
    assert_eq!(targets, RefreshOutcome::Failed);
    assert!(surface.is_empty());
}
