// Pure mappings from portfolio data to chart definitions.

use crate::chart::config::{
    Axis, ChartConfig, ChartData, ChartOptions, ChartType, ColorSpec, Dataset, Legend, Plugins, Scales,
};
use crate::models::{AllocationSeries, PriceTargets, Ticker, TimeSeries};
use crate::palette::{self, Palette, Rgba, PORTFOLIO_LINE, PRICE_TARGET_FILL, STOCK_LINE};

pub const PORTFOLIO_VALUE_LABEL: &str = "Portfolio value over time";
pub const TOP_INVESTMENTS_LABEL: &str = "Profit (€)";
pub const PRICE_TARGETS_LABEL: &str = "Analyst price targets";

pub fn portfolio_value_line(series: &TimeSeries) -> ChartConfig {
    let mut dataset = Dataset::new(
        PORTFOLIO_VALUE_LABEL,
        &series.values(),
        ColorSpec::Single(PORTFOLIO_LINE.with_alpha(0.2)),
        ColorSpec::Single(PORTFOLIO_LINE),
    );
    dataset.fill = Some(true);

    ChartConfig {
        chart_type: ChartType::Line,
        data: ChartData {
            labels: series.dates(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            maintain_aspect_ratio: true,
            scales: Some(Scales {
                x: Some(Axis::titled("Date")),
                y: Some(Axis::titled("Position value")),
            }),
            ..ChartOptions::default()
        },
    }
}

/// Data block of the stock price chart. Used on its own when an existing
/// chart only needs its data swapped.
pub fn stock_price_data(ticker: &Ticker, series: &TimeSeries) -> ChartData {
    let mut dataset = Dataset::new(
        format!("{} share price", ticker),
        &series.values(),
        ColorSpec::Single(STOCK_LINE.with_alpha(0.6)),
        ColorSpec::Single(STOCK_LINE),
    );
    dataset.fill = Some(true);
    dataset.border_width = Some(3);
    dataset.point_radius = Some(6);
    dataset.tension = Some(0.4);

    ChartData {
        labels: series.dates(),
        datasets: vec![dataset],
    }
}

pub fn stock_price_line(ticker: &Ticker, series: &TimeSeries) -> ChartConfig {
    ChartConfig {
        chart_type: ChartType::Line,
        data: stock_price_data(ticker, series),
        options: ChartOptions {
            scales: Some(Scales {
                x: Some(Axis::titled("Date")),
                y: Some(Axis::titled("Price (USD)")),
            }),
            plugins: Some(Plugins { legend: Some(Legend { display: true }) }),
            ..ChartOptions::default()
        },
    }
}

fn palette_dataset(label: &str, series: &AllocationSeries, palette: &Palette) -> Dataset {
    let mut dataset = Dataset::new(
        label,
        &series.values(),
        ColorSpec::PerPoint(palette.background_colors(series.len())),
        ColorSpec::PerPoint(palette.border_colors(series.len())),
    );
    dataset.border_width = Some(1);
    dataset
}

/// Pie chart of an allocation breakdown, one palette colour per slice.
pub fn allocation_pie(title: &str, series: &AllocationSeries, palette: &Palette) -> ChartConfig {
    ChartConfig {
        chart_type: ChartType::Pie,
        data: ChartData {
            labels: series.labels(),
            datasets: vec![palette_dataset(title, series, palette)],
        },
        options: ChartOptions::default(),
    }
}

/// Bar chart of profit per top investment. The series carries profits in
/// place of percentages.
pub fn top_investments_bar(series: &AllocationSeries) -> ChartConfig {
    ChartConfig {
        chart_type: ChartType::Bar,
        data: ChartData {
            labels: series.labels(),
            datasets: vec![palette_dataset(TOP_INVESTMENTS_LABEL, series, &Palette::DASHBOARD)],
        },
        options: ChartOptions {
            scales: Some(Scales {
                x: None,
                y: Some(Axis::default().from_zero()),
            }),
            ..ChartOptions::default()
        },
    }
}

pub fn price_targets_data(targets: &PriceTargets) -> ChartData {
    let borders: Vec<Rgba> = PRICE_TARGET_FILL.iter().map(|c| c.with_alpha(1.0)).collect();
    let dataset = Dataset {
        label: PRICE_TARGETS_LABEL.to_string(),
        data: targets.values().to_vec(),
        background_color: ColorSpec::PerPoint(palette::cycle(&PRICE_TARGET_FILL, PriceTargets::LABELS.len())),
        border_color: ColorSpec::PerPoint(borders),
        border_width: Some(1),
        fill: None,
        tension: None,
        point_radius: None,
        bar_thickness: Some(35),
        border_radius: Some(10),
    };

    ChartData {
        labels: PriceTargets::LABELS.iter().map(|l| l.to_string()).collect(),
        datasets: vec![dataset],
    }
}

pub fn price_targets_bar(targets: &PriceTargets) -> ChartConfig {
    ChartConfig {
        chart_type: ChartType::Bar,
        data: price_targets_data(targets),
        options: ChartOptions {
            scales: Some(Scales {
                x: Some(Axis::titled("Target type")),
                y: Some(Axis::titled("Price (USD)").from_zero()),
            }),
            plugins: Some(Plugins { legend: Some(Legend { display: false }) }),
            ..ChartOptions::default()
        },
    }
}
