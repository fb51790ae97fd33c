use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use crate::page::StaticPage;
use crate::state::AppState;
use crate::surface::InMemorySurface;
use crate::views::{dashboard, portfolio_value, RenderedChart};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio-value", post(render_portfolio_value))
        .route("/dashboard", post(render_dashboard))
}

// Page charts are drawn once per page load, so each request gets a
// throwaway surface instead of the shared one.

pub async fn render_portfolio_value(
    Json(page): Json<StaticPage>,
) -> Json<Vec<RenderedChart>> {
    info!("POST /charts/portfolio-value - Rendering portfolio value chart");
    let surface = InMemorySurface::new();
    Json(portfolio_value::render(&page, &surface).into_iter().collect())
}

pub async fn render_dashboard(
    Json(page): Json<StaticPage>,
) -> Json<Vec<RenderedChart>> {
    info!("POST /charts/dashboard - Rendering dashboard charts");
    let surface = InMemorySurface::new();
    Json(dashboard::render(&page, &surface))
}
