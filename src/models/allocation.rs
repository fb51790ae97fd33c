use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

/// One slice of an allocation breakdown: a stock, sector or country and its
/// share of the portfolio in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationDatum {
    pub label: String,
    pub percentage: f64,
}

/// Ordered allocation slices for a single chart. Percentages are expected to
/// sum to roughly 100 but are not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationSeries {
    pub items: Vec<AllocationDatum>,
}

impl AllocationSeries {
    /// Pairs the parallel label/value arrays pages embed. Arrays of different
    /// lengths are rejected.
    pub fn from_parallel(labels: Vec<String>, values: Vec<f64>) -> Result<Self, ChartError> {
        if labels.len() != values.len() {
            return Err(ChartError::InvalidPayload(format!(
                "{} labels but {} values",
                labels.len(),
                values.len()
            )));
        }

        let items = labels
            .into_iter()
            .zip(values)
            .map(|(label, percentage)| AllocationDatum { label, percentage })
            .collect();

        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(|d| d.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.items.iter().map(|d| d.percentage).collect()
    }
}
