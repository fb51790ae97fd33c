use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::chart;
use crate::config::RefreshPolicy;
use crate::external::StockDataSource;
use crate::models::{Period, Ticker};
use crate::surface::{ChartHandle, ChartSurface};

pub const PRICE_CANVAS: &str = "stockChart";
pub const TARGETS_CANVAS: &str = "priceTargetsChart";

/// What a refresh did to its chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Created(ChartHandle),
    Updated(ChartHandle),
    /// A newer response was already applied; this one was dropped.
    Stale,
    /// Fetch or render failed; the chart was left as it was.
    Failed,
}

#[derive(Debug, Default)]
struct ChartSlot {
    handle: Option<ChartHandle>,
    applied_seq: u64,
}

/// Owns the two charts of one stock detail page and refreshes them from the
/// backend. Requests are never cancelled; `RefreshPolicy` decides what an
/// out-of-order response does.
pub struct StockDetailController {
    ticker: Ticker,
    source: Arc<dyn StockDataSource>,
    surface: Arc<dyn ChartSurface>,
    policy: RefreshPolicy,
    next_seq: AtomicU64,
    price_chart: Mutex<ChartSlot>,
    targets_chart: Mutex<ChartSlot>,
}

impl StockDetailController {
    pub fn new(
        ticker: Ticker,
        source: Arc<dyn StockDataSource>,
        surface: Arc<dyn ChartSurface>,
        policy: RefreshPolicy,
    ) -> Self {
        Self {
            ticker,
            source,
            surface,
            policy,
            next_seq: AtomicU64::new(1),
            price_chart: Mutex::new(ChartSlot::default()),
            targets_chart: Mutex::new(ChartSlot::default()),
        }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn price_chart(&self) -> Option<ChartHandle> {
        self.price_chart.lock().handle
    }

    pub fn price_targets_chart(&self) -> Option<ChartHandle> {
        self.targets_chart.lock().handle
    }

    /// Page load: price history for `period` and the price targets, fetched
    /// concurrently.
    pub async fn initialize(&self, period: Period) -> (RefreshOutcome, RefreshOutcome) {
        info!("Initializing stock charts for {} ({})", self.ticker, period);
        futures::join!(self.load_chart_data(period), self.load_price_targets())
    }

    /// Period selector changed.
    pub async fn on_period_change(&self, period: Period) -> RefreshOutcome {
        self.load_chart_data(period).await
    }

    pub async fn load_chart_data(&self, period: Period) -> RefreshOutcome {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);

        let series = match self.source.stock_chart(&self.ticker, period).await {
            Ok(series) => series,
            Err(e) => {
                error!("Failed to load {} price history for {}: {}", period, self.ticker, e);
                return RefreshOutcome::Failed;
            }
        };

        let mut slot = self.price_chart.lock();
        if self.policy == RefreshPolicy::NewestRequestWins && seq < slot.applied_seq {
            debug!(
                "Dropping stale {} history for {} (request {}, showing {})",
                period, self.ticker, seq, slot.applied_seq
            );
            return RefreshOutcome::Stale;
        }

        let outcome = match slot.handle {
            Some(handle) => self
                .surface
                .update(&handle, chart::stock_price_data(&self.ticker, &series))
                .map(|_| RefreshOutcome::Updated(handle)),
            None => self
                .surface
                .create(PRICE_CANVAS, chart::stock_price_line(&self.ticker, &series))
                .map(RefreshOutcome::Created),
        };

        match outcome {
            Ok(outcome) => {
                if let RefreshOutcome::Created(handle) = outcome {
                    slot.handle = Some(handle);
                }
                slot.applied_seq = slot.applied_seq.max(seq);
                if let Some(latest) = series.last() {
                    debug!(
                        "Applied {} history for {} ({} points, {} close {})",
                        period,
                        self.ticker,
                        series.len(),
                        latest.date,
                        latest.value
                    );
                }
                outcome
            }
            Err(e) => {
                error!("Failed to draw price chart for {}: {}", self.ticker, e);
                RefreshOutcome::Failed
            }
        }
    }

    pub async fn load_price_targets(&self) -> RefreshOutcome {
        let targets = match self.source.price_targets(&self.ticker).await {
            Ok(targets) => targets,
            Err(e) => {
                error!("Failed to load price targets for {}: {}", self.ticker, e);
                return RefreshOutcome::Failed;
            }
        };

        let mut slot = self.targets_chart.lock();
        let outcome = match slot.handle {
            Some(handle) => self
                .surface
                .update(&handle, chart::price_targets_data(&targets))
                .map(|_| RefreshOutcome::Updated(handle)),
            None => self
                .surface
                .create(TARGETS_CANVAS, chart::price_targets_bar(&targets))
                .map(RefreshOutcome::Created),
        };

        match outcome {
            Ok(outcome) => {
                if let RefreshOutcome::Created(handle) = outcome {
                    slot.handle = Some(handle);
                }
                outcome
            }
            Err(e) => {
                error!("Failed to draw price targets for {}: {}", self.ticker, e);
                RefreshOutcome::Failed
            }
        }
    }
}
