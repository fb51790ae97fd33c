mod allocation;
mod price_target;
mod ticker;
mod time_series;

pub use allocation::{AllocationDatum, AllocationSeries};
pub use price_target::PriceTargets;
pub use ticker::{Period, Ticker};
pub use time_series::{PortfolioValuePayload, TimeSeries, TimeSeriesPoint};
