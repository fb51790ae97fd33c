use std::sync::Arc;

use tokio::net::TcpListener;

use portfolio_charts::app;
use portfolio_charts::config::ChartsConfig;
use portfolio_charts::external::HttpStockApi;
use portfolio_charts::logging::{self, LoggingConfig};
use portfolio_charts::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env()?)?;

    let config = ChartsConfig::from_env()?;
    tracing::info!(
        "Using stock backend at {} (refresh policy: {:?})",
        config.stock_api_url,
        config.refresh_policy
    );

    let stock_api = HttpStockApi::from_config(&config)?;
    let addr = config.bind_addr;
    let state = AppState::new(config, Arc::new(stock_api));
    let app = app::create_app(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Portfolio charts service running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
