use std::fmt;

use serde::{Serialize, Serializer};

/// An RGBA colour, rendered the way canvas charting libraries expect it:
/// `rgba(54, 162, 235, 0.6)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Returns exactly `count` entries, entry `i` being `palette[i % palette.len()]`.
/// An empty palette yields an empty vector.
pub fn cycle<T: Clone>(palette: &[T], count: usize) -> Vec<T> {
    if palette.is_empty() {
        return Vec::new();
    }
    palette.iter().cloned().cycle().take(count).collect()
}

/// A set of base hues plus the fill alpha a chart family uses.
/// Borders are always drawn opaque.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    hues: &'static [Rgba],
    fill_alpha: f32,
}

const DASHBOARD_HUES: [Rgba; 7] = [
    Rgba::new(54, 162, 235, 1.0),
    Rgba::new(255, 99, 132, 1.0),
    Rgba::new(75, 192, 192, 1.0),
    Rgba::new(255, 206, 86, 1.0),
    Rgba::new(153, 102, 255, 1.0),
    Rgba::new(255, 159, 64, 1.0),
    Rgba::new(199, 199, 199, 1.0),
];

const SECTOR_HUES: [Rgba; 6] = [
    Rgba::new(255, 99, 132, 1.0),
    Rgba::new(54, 162, 235, 1.0),
    Rgba::new(255, 206, 86, 1.0),
    Rgba::new(75, 192, 192, 1.0),
    Rgba::new(153, 102, 255, 1.0),
    Rgba::new(255, 159, 64, 1.0),
];

impl Palette {
    /// Top investments and stock/country allocation charts.
    pub const DASHBOARD: Palette = Palette { hues: &DASHBOARD_HUES, fill_alpha: 0.6 };
    /// Sector allocation chart.
    pub const SECTOR: Palette = Palette { hues: &SECTOR_HUES, fill_alpha: 0.2 };

    pub fn background_colors(&self, count: usize) -> Vec<Rgba> {
        cycle(self.hues, count)
            .into_iter()
            .map(|c| c.with_alpha(self.fill_alpha))
            .collect()
    }

    pub fn border_colors(&self, count: usize) -> Vec<Rgba> {
        cycle(self.hues, count)
            .into_iter()
            .map(|c| c.with_alpha(1.0))
            .collect()
    }
}

/// Fixed colours for the four price-target bars: low, mean, high, current.
pub const PRICE_TARGET_FILL: [Rgba; 4] = [
    Rgba::new(233, 30, 99, 0.7),
    Rgba::new(3, 169, 244, 0.7),
    Rgba::new(76, 175, 80, 0.7),
    Rgba::new(255, 193, 7, 0.8),
];

pub const PORTFOLIO_LINE: Rgba = Rgba::new(75, 192, 192, 1.0);
pub const STOCK_LINE: Rgba = Rgba::new(63, 81, 181, 1.0);
