use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::chart::{ChartConfig, ChartData};
use crate::errors::ChartError;

/// Identifies a chart instance created on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChartHandle(Uuid);

impl ChartHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChartHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The charting library seam: creates chart instances on canvases and swaps
/// their data followed by a redraw.
pub trait ChartSurface: Send + Sync {
    fn create(&self, canvas_id: &str, config: ChartConfig) -> Result<ChartHandle, ChartError>;

    fn update(&self, handle: &ChartHandle, data: ChartData) -> Result<(), ChartError>;
}

/// A chart instance as last drawn.
#[derive(Debug, Clone, Serialize)]
pub struct ChartInstance {
    pub handle: ChartHandle,
    pub canvas_id: String,
    pub config: ChartConfig,
    /// 0 on creation, incremented per update.
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
}

/// Surface that keeps every instance in memory. Backs the HTTP service,
/// which returns the recorded configs to the browser for drawing.
#[derive(Clone, Default)]
pub struct InMemorySurface {
    charts: Arc<DashMap<ChartHandle, ChartInstance>>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: &ChartHandle) -> Option<ChartInstance> {
        self.charts.get(handle).map(|entry| entry.value().clone())
    }

    /// Instances drawn on `canvas_id`, oldest first.
    pub fn on_canvas(&self, canvas_id: &str) -> Vec<ChartInstance> {
        let mut found: Vec<ChartInstance> = self
            .charts
            .iter()
            .filter(|entry| entry.canvas_id == canvas_id)
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|c| c.updated_at);
        found
    }

    pub fn destroy(&self, handle: &ChartHandle) -> bool {
        self.charts.remove(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl ChartSurface for InMemorySurface {
    fn create(&self, canvas_id: &str, config: ChartConfig) -> Result<ChartHandle, ChartError> {
        let handle = ChartHandle::new();
        self.charts.insert(
            handle,
            ChartInstance {
                handle,
                canvas_id: canvas_id.to_string(),
                config,
                revision: 0,
                updated_at: Utc::now(),
            },
        );
        tracing::debug!("Created chart {} on canvas '{}'", handle, canvas_id);
        Ok(handle)
    }

    fn update(&self, handle: &ChartHandle, data: ChartData) -> Result<(), ChartError> {
        let mut entry = self
            .charts
            .get_mut(handle)
            .ok_or_else(|| ChartError::UnknownChart(handle.to_string()))?;
        entry.config.data = data;
        entry.revision += 1;
        entry.updated_at = Utc::now();
        tracing::debug!("Redrew chart {} (revision {})", handle, entry.revision);
        Ok(())
    }
}
