use std::collections::{HashMap, HashSet};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

/// The element lookup a view needs from the page it is bound to: JSON
/// payloads embedded as element text, and canvases to draw on.
pub trait Page {
    fn element_text(&self, id: &str) -> Option<&str>;

    fn has_canvas(&self, id: &str) -> bool;
}

/// A page held in memory. Deserialises from
/// `{"payloads": {"id": "<json text>"}, "canvases": ["id"]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPage {
    #[serde(default)]
    pub payloads: HashMap<String, String>,
    #[serde(default)]
    pub canvases: HashSet<String>,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.payloads.insert(id.into(), text.into());
        self
    }

    pub fn with_canvas(mut self, id: impl Into<String>) -> Self {
        self.canvases.insert(id.into());
        self
    }
}

impl Page for StaticPage {
    fn element_text(&self, id: &str) -> Option<&str> {
        self.payloads.get(id).map(String::as_str)
    }

    fn has_canvas(&self, id: &str) -> bool {
        self.canvases.contains(id)
    }
}

/// Parses the JSON text of element `id`. Blank text is read as an empty
/// array, matching how pages render empty lists.
pub fn read_json<T: DeserializeOwned>(page: &dyn Page, id: &str) -> Result<T, ChartError> {
    let text = page
        .element_text(id)
        .ok_or_else(|| ChartError::MissingElement(id.to_string()))?;

    let text = if text.trim().is_empty() { "[]" } else { text };

    serde_json::from_str(text).map_err(|source| ChartError::Parse {
        id: id.to_string(),
        source,
    })
}

pub fn require_canvas(page: &dyn Page, id: &str) -> Result<(), ChartError> {
    if page.has_canvas(id) {
        Ok(())
    } else {
        Err(ChartError::MissingCanvas(id.to_string()))
    }
}
