pub mod builders;
pub mod config;

pub use builders::*;
pub use config::{Axis, ChartConfig, ChartData, ChartOptions, ChartType, ColorSpec, Dataset};
