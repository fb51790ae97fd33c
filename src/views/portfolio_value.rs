use tracing::error;

use crate::chart;
use crate::errors::ChartError;
use crate::models::{PortfolioValuePayload, TimeSeries};
use crate::page::{self, Page};
use crate::surface::ChartSurface;
use crate::views::RenderedChart;

pub const DATA_ELEMENT: &str = "chartData";
pub const CANVAS: &str = "portfolioChart";

fn build(page: &dyn Page, surface: &dyn ChartSurface) -> Result<RenderedChart, ChartError> {
    let payload: PortfolioValuePayload = page::read_json(page, DATA_ELEMENT)?;
    let series = TimeSeries::try_from(payload)?;
    if series.is_empty() {
        return Err(ChartError::EmptyData(CANVAS.to_string()));
    }
    page::require_canvas(page, CANVAS)?;

    let config = chart::portfolio_value_line(&series);
    let handle = surface.create(CANVAS, config.clone())?;
    Ok(RenderedChart {
        handle,
        canvas_id: CANVAS.to_string(),
        config,
    })
}

/// Draws the portfolio value line chart. Any problem with the page is
/// logged and leaves the canvas empty.
pub fn render(page: &dyn Page, surface: &dyn ChartSurface) -> Option<RenderedChart> {
    match build(page, surface) {
        Ok(rendered) => Some(rendered),
        Err(e) => {
            error!("Portfolio value chart not rendered: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::StaticPage;
    use crate::surface::InMemorySurface;

    fn page_with(payload: &str) -> StaticPage {
        StaticPage::new()
            .with_payload(DATA_ELEMENT, payload)
            .with_canvas(CANVAS)
    }

    #[test]
    fn test_renders_line_chart() {
        let surface = InMemorySurface::new();
        let page = page_with(r#"{"dates": ["2024-01", "2024-02"], "values": [1000, 1250.5]}"#);

        let rendered = render(&page, &surface).expect("chart rendered");
        assert_eq!(rendered.config.data.labels.len(), 2);
        assert_eq!(surface.on_canvas(CANVAS).len(), 1);
    }

    #[test]
    fn test_missing_element_renders_nothing() {
        let surface = InMemorySurface::new();
        let page = StaticPage::new().with_canvas(CANVAS);
        assert!(render(&page, &surface).is_none());
        assert!(surface.is_empty());
    }

    #[test]
    fn test_malformed_or_empty_data_renders_nothing() {
        let surface = InMemorySurface::new();
        for payload in ["{not json", r#"{"dates": [], "values": []}"#, r#"{"dates": ["2024-01"]}"#] {
            assert!(render(&page_with(payload), &surface).is_none(), "payload {}", payload);
        }
        assert!(surface.is_empty());
    }

    #[test]
    fn test_missing_canvas_renders_nothing() {
        let surface = InMemorySurface::new();
        let page = StaticPage::new().with_payload(DATA_ELEMENT, r#"{"dates": ["2024-01"], "values": [1]}"#);
        assert!(render(&page, &surface).is_none());
        assert!(surface.is_empty());
    }
}
