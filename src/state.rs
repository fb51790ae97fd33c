use std::sync::Arc;

use crate::config::ChartsConfig;
use crate::external::StockDataSource;
use crate::surface::InMemorySurface;
use crate::views::stock_pages::StockPages;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ChartsConfig>,
    pub stock_source: Arc<dyn StockDataSource>,
    pub surface: InMemorySurface,
    /// Controllers of stock pages that drew at least one chart.
    pub stock_pages: StockPages,
}

impl AppState {
    pub fn new(config: ChartsConfig, stock_source: Arc<dyn StockDataSource>) -> Self {
        let surface = InMemorySurface::new();
        let stock_pages = StockPages::new(surface.clone(), config.stock_page_limit, config.stock_page_idle);
        Self {
            config: Arc::new(config),
            stock_source,
            surface,
            stock_pages,
        }
    }
}
