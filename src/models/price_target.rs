use serde::{Deserialize, Serialize};

/// Analyst price targets for one ticker alongside the current price.
/// The backend sends `null` for figures it could not obtain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTargets {
    pub target_low: Option<f64>,
    pub target_mean: Option<f64>,
    pub target_high: Option<f64>,
    #[serde(rename = "current_price_analyst")]
    pub current_price: Option<f64>,
}

impl PriceTargets {
    pub const LABELS: [&'static str; 4] = ["Low", "Average", "High", "Current"];

    /// Values in bar order: low, mean, high, current.
    pub fn values(&self) -> [Option<f64>; 4] {
        [self.target_low, self.target_mean, self.target_high, self.current_price]
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let targets: PriceTargets = serde_json::from_str(
            r#"{"target_low": 150.0, "target_mean": 190.5, "target_high": 240.0, "current_price_analyst": 182.3}"#,
        )
        .unwrap();
        assert_eq!(targets.values(), [Some(150.0), Some(190.5), Some(240.0), Some(182.3)]);
    }

    #[test]
    fn test_null_figures_are_gaps() {
        let targets: PriceTargets = serde_json::from_str(
            r#"{"target_low": null, "target_mean": 10.0, "target_high": null, "current_price_analyst": null}"#,
        )
        .unwrap();
        assert_eq!(targets.values()[0], None);
        assert!(!targets.is_empty());
        assert!(PriceTargets::default().is_empty());
    }
}
