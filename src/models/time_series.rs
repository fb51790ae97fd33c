use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

/// A dated value: portfolio value or closing price on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub value: f64,
}

/// Points ordered by date as delivered by the page or the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    pub fn from_parallel(dates: Vec<String>, values: Vec<f64>) -> Result<Self, ChartError> {
        if dates.len() != values.len() {
            return Err(ChartError::InvalidPayload(format!(
                "{} dates but {} values",
                dates.len(),
                values.len()
            )));
        }

        let points = dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| TimeSeriesPoint { date, value })
            .collect();

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<String> {
        self.points.iter().map(|p| p.date.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn last(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }
}

/// The `{dates, values}` object embedded for the portfolio value chart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioValuePayload {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl TryFrom<PortfolioValuePayload> for TimeSeries {
    type Error = ChartError;

    fn try_from(payload: PortfolioValuePayload) -> Result<Self, Self::Error> {
        TimeSeries::from_parallel(payload.dates, payload.values)
    }
}
