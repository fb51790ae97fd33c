use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{Period, Ticker};
use crate::state::AppState;
use crate::surface::ChartInstance;
use crate::views::stock_detail::{RefreshOutcome, StockDetailController};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stock/:ticker", get(get_stock_charts))
}

#[derive(Debug, Deserialize)]
pub struct StockChartQuery {
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StockChartsResponse {
    pub ticker: Ticker,
    pub period: Period,
    /// False when the backend could not be reached or returned an error;
    /// the charts then show what they showed before.
    pub refreshed: bool,
    pub price_chart: Option<ChartInstance>,
    pub price_targets_chart: Option<ChartInstance>,
}

pub async fn get_stock_charts(
    Path(ticker): Path<String>,
    Query(query): Query<StockChartQuery>,
    State(state): State<AppState>,
) -> Result<Json<StockChartsResponse>, AppError> {
    let ticker = Ticker::parse(&ticker)?;
    let period = match query.period.as_deref() {
        Some(raw) => raw.parse::<Period>()?,
        None => state.config.default_period,
    };
    info!("GET /charts/stock/{}?period={} - Refreshing stock charts", ticker, period);

    state.stock_pages.evict_idle(Utc::now());

    let (controller, outcome) = match state.stock_pages.get(&ticker) {
        Some(controller) => {
            let outcome = controller.on_period_change(period).await;
            // Retry targets until they have been drawn once.
            if controller.price_targets_chart().is_none() {
                controller.load_price_targets().await;
            }
            (controller, outcome)
        }
        None => {
            let controller = Arc::new(StockDetailController::new(
                ticker.clone(),
                state.stock_source.clone(),
                Arc::new(state.surface.clone()),
                state.config.refresh_policy,
            ));
            let (outcome, _) = controller.initialize(period).await;
            if controller.price_chart().is_none() && controller.price_targets_chart().is_none() {
                // Nothing drawn, nothing to keep.
                debug!("No charts drawn for {}, page not tracked", ticker);
                (controller, outcome)
            } else {
                (state.stock_pages.insert(controller), outcome)
            }
        }
    };

    let refreshed = !matches!(outcome, RefreshOutcome::Failed);
    Ok(Json(StockChartsResponse {
        ticker,
        period,
        refreshed,
        price_chart: controller.price_chart().and_then(|h| state.surface.get(&h)),
        price_targets_chart: controller.price_targets_chart().and_then(|h| state.surface.get(&h)),
    }))
}
