use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::models::Ticker;
use crate::surface::InMemorySurface;
use crate::views::stock_detail::StockDetailController;

struct TrackedPage {
    controller: Arc<StockDetailController>,
    last_used: DateTime<Utc>,
}

/// Stock detail controllers kept between requests, so a period change
/// updates the chart drawn on first view.
///
/// Pages idle for longer than `idle_ttl` are dropped, and once `capacity`
/// pages are tracked the least recently used one makes room for a new one.
/// Dropping a page destroys its charts on the surface.
#[derive(Clone)]
pub struct StockPages {
    pages: Arc<DashMap<Ticker, TrackedPage>>,
    surface: InMemorySurface,
    capacity: usize,
    idle_ttl: Duration,
}

impl StockPages {
    pub fn new(surface: InMemorySurface, capacity: usize, idle_ttl: std::time::Duration) -> Self {
        Self {
            pages: Arc::new(DashMap::new()),
            surface,
            capacity: capacity.max(1),
            idle_ttl: Duration::from_std(idle_ttl).unwrap_or(Duration::MAX),
        }
    }

    /// The tracked controller for `ticker`, marked as just used.
    pub fn get(&self, ticker: &Ticker) -> Option<Arc<StockDetailController>> {
        self.pages.get_mut(ticker).map(|mut page| {
            page.last_used = Utc::now();
            page.controller.clone()
        })
    }

    /// Starts tracking `controller`. If another request already tracks a
    /// page for the same ticker, that one is kept and returned and the
    /// charts of `controller` are destroyed.
    pub fn insert(&self, controller: Arc<StockDetailController>) -> Arc<StockDetailController> {
        let ticker = controller.ticker().clone();
        if !self.pages.contains_key(&ticker) && self.pages.len() >= self.capacity {
            self.evict_least_recent();
        }

        match self.pages.entry(ticker) {
            Entry::Occupied(mut entry) => {
                self.release(&controller);
                let page = entry.get_mut();
                page.last_used = Utc::now();
                page.controller.clone()
            }
            Entry::Vacant(entry) => {
                debug!("Tracking stock page for {}", controller.ticker());
                entry.insert(TrackedPage {
                    controller: controller.clone(),
                    last_used: Utc::now(),
                });
                controller
            }
        }
    }

    /// Drops every page not used since `now - idle_ttl`. Returns how many
    /// were dropped.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let idle: Vec<Ticker> = self
            .pages
            .iter()
            .filter(|page| now - page.last_used >= self.idle_ttl)
            .map(|page| page.key().clone())
            .collect();

        let mut dropped = 0;
        for ticker in idle {
            if let Some((_, page)) = self.pages.remove(&ticker) {
                self.release(&page.controller);
                dropped += 1;
            }
        }
        if dropped > 0 {
            info!("Dropped {} idle stock pages, {} still tracked", dropped, self.pages.len());
        }
        dropped
    }

    fn evict_least_recent(&self) {
        let oldest = self
            .pages
            .iter()
            .min_by_key(|page| page.last_used)
            .map(|page| page.key().clone());

        if let Some((ticker, page)) = oldest.and_then(|ticker| self.pages.remove(&ticker)) {
            info!("Stock page limit of {} reached, dropping {}", self.capacity, ticker);
            self.release(&page.controller);
        }
    }

    fn release(&self, controller: &StockDetailController) {
        for handle in [controller.price_chart(), controller.price_targets_chart()]
            .into_iter()
            .flatten()
        {
            self.surface.destroy(&handle);
        }
        debug!("Released charts of {}", controller.ticker());
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
