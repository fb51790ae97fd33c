use tracing::{debug, error, warn};

use crate::chart::{self, ChartConfig};
use crate::errors::ChartError;
use crate::models::AllocationSeries;
use crate::page::{self, Page};
use crate::palette::Palette;
use crate::surface::ChartSurface;
use crate::views::RenderedChart;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    TopInvestments,
    Allocation,
}

/// Where one dashboard chart reads its data and draws itself.
#[derive(Debug, Clone, Copy)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: &'static str,
    pub labels_id: &'static str,
    pub values_id: &'static str,
    pub canvas_id: &'static str,
    pub palette: Palette,
}

pub const TOP_INVESTMENTS: Panel = Panel {
    kind: PanelKind::TopInvestments,
    title: chart::TOP_INVESTMENTS_LABEL,
    labels_id: "topInvestmentLabels",
    values_id: "topInvestmentProfits",
    canvas_id: "topInvestmentChart",
    palette: Palette::DASHBOARD,
};

pub const STOCK_ALLOCATION: Panel = Panel {
    kind: PanelKind::Allocation,
    title: "Allocation by stock (%)",
    labels_id: "stockLabelsData",
    values_id: "stockPercentagesData",
    canvas_id: "allocationChart",
    palette: Palette::DASHBOARD,
};

pub const COUNTRY_ALLOCATION: Panel = Panel {
    kind: PanelKind::Allocation,
    title: "Allocation by country (%)",
    labels_id: "countryLabelsData",
    values_id: "countryPercentagesData",
    canvas_id: "countryAllocationChart",
    palette: Palette::DASHBOARD,
};

pub const SECTOR_ALLOCATION: Panel = Panel {
    kind: PanelKind::Allocation,
    title: "Allocation by sector (%)",
    labels_id: "sectorLabelsData",
    values_id: "sectorPercentagesData",
    canvas_id: "sectorAllocationChart",
    palette: Palette::SECTOR,
};

pub const PANELS: [Panel; 4] = [TOP_INVESTMENTS, STOCK_ALLOCATION, COUNTRY_ALLOCATION, SECTOR_ALLOCATION];

impl Panel {
    fn config(&self, series: &AllocationSeries) -> ChartConfig {
        match self.kind {
            PanelKind::TopInvestments => chart::top_investments_bar(series),
            PanelKind::Allocation => chart::allocation_pie(self.title, series, &self.palette),
        }
    }

    /// `Ok(None)` when the page does not carry this panel at all.
    fn render(&self, page: &dyn Page, surface: &dyn ChartSurface) -> Result<Option<RenderedChart>, ChartError> {
        if page.element_text(self.labels_id).is_none() || page.element_text(self.values_id).is_none() {
            debug!("Dashboard panel '{}' not present on page", self.canvas_id);
            return Ok(None);
        }

        let labels: Vec<String> = page::read_json(page, self.labels_id)?;
        let values: Vec<f64> = page::read_json(page, self.values_id)?;
        let series = AllocationSeries::from_parallel(labels, values)?;
        if series.is_empty() {
            return Err(ChartError::EmptyData(self.canvas_id.to_string()));
        }
        page::require_canvas(page, self.canvas_id)?;

        let config = self.config(&series);
        let handle = surface.create(self.canvas_id, config.clone())?;
        Ok(Some(RenderedChart {
            handle,
            canvas_id: self.canvas_id.to_string(),
            config,
        }))
    }
}

/// Draws every dashboard panel the page carries. Each panel fails on its
/// own: problems are logged and the remaining panels still render.
pub fn render(page: &dyn Page, surface: &dyn ChartSurface) -> Vec<RenderedChart> {
    PANELS
        .iter()
        .filter_map(|panel| match panel.render(page, surface) {
            Ok(rendered) => rendered,
            Err(ChartError::EmptyData(canvas)) => {
                warn!("No data available for dashboard chart '{}'", canvas);
                None
            }
            Err(e) => {
                error!("Dashboard chart '{}' not rendered: {}", panel.canvas_id, e);
                None
            }
        })
        .collect()
}
