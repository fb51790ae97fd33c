use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::debug;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub stock_pages: usize,
    pub charts: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let report = HealthReport {
        status: "ok",
        stock_pages: state.stock_pages.len(),
        charts: state.surface.len(),
    };
    debug!(
        "Health check: {} stock pages tracking {} charts",
        report.stock_pages, report.charts
    );
    Json(report)
}
