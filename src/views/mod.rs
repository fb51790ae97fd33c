pub mod dashboard;
pub mod portfolio_value;
pub mod stock_detail;
pub mod stock_pages;

use serde::Serialize;

use crate::chart::ChartConfig;
use crate::surface::ChartHandle;

/// A chart a view created, with the canvas it was drawn on.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedChart {
    pub handle: ChartHandle,
    pub canvas_id: String,
    pub config: ChartConfig,
}
