use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use crate::errors::ChartError;

/// Where log lines go: always the console, and Loki as well when enabled.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_url: Option<Url>,
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, ChartError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `LOKI_URL` is only read when `LOKI_ENABLED` is `true` or `1`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChartError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let loki_enabled = lookup("LOKI_ENABLED")
            .map(|raw| matches!(raw.trim().to_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        let loki_url = if loki_enabled {
            let raw = lookup("LOKI_URL").ok_or_else(|| {
                ChartError::Config("LOKI_ENABLED is set but LOKI_URL is missing".to_string())
            })?;
            let url = Url::parse(&raw)
                .map_err(|e| ChartError::Config(format!("Invalid LOKI_URL '{}': {}", raw, e)))?;
            Some(url)
        } else {
            None
        };

        Ok(Self {
            loki_url,
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "portfolio-charts".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    fn filter(&self) -> Result<EnvFilter, ChartError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| ChartError::Config(format!("Invalid RUST_LOG '{}': {}", self.log_level, e)))
    }
}

pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "loki")]
    {
        if let Some(loki_url) = config.loki_url.clone() {
            return init_with_loki(&config, loki_url);
        }
    }

    #[cfg(not(feature = "loki"))]
    {
        if config.loki_url.is_some() {
            eprintln!("LOKI_URL ignored: built without the `loki` feature");
        }
    }

    tracing_subscriber::registry()
        .with(config.filter()?)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::info!(
        "{} ({}) logging to console at '{}'",
        config.service_name,
        config.environment,
        config.log_level
    );
    Ok(())
}

#[cfg(feature = "loki")]
fn init_with_loki(config: &LoggingConfig, loki_url: Url) -> Result<(), Box<dyn std::error::Error>> {
    let (loki_layer, shipper) = tracing_loki::builder()
        .label("service", &config.service_name)?
        .label("environment", &config.environment)?
        .build_url(loki_url.clone())?;

    // Must run on the tokio runtime.
    tokio::spawn(shipper);

    tracing_subscriber::registry()
        .with(config.filter()?)
        .with(tracing_subscriber::fmt::layer())
        .with(loki_layer)
        .try_init()?;

    tracing::info!("{} logging to console and Loki at {}", config.service_name, loki_url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<LoggingConfig, ChartError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LoggingConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_console_only_by_default() {
        let config = from_pairs(&[("LOKI_URL", "http://loki:3100")]).unwrap();
        assert!(config.loki_url.is_none());
        assert_eq!(config.service_name, "portfolio-charts");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_loki_needs_a_valid_url() {
        assert!(matches!(from_pairs(&[("LOKI_ENABLED", "true")]), Err(ChartError::Config(_))));
        assert!(matches!(
            from_pairs(&[("LOKI_ENABLED", "1"), ("LOKI_URL", "not a url")]),
            Err(ChartError::Config(_))
        ));

        let config = from_pairs(&[("LOKI_ENABLED", "TRUE"), ("LOKI_URL", "http://loki:3100")]).unwrap();
        assert_eq!(config.loki_url.unwrap().host_str(), Some("loki"));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = from_pairs(&[("RUST_LOG", "portfolio_charts=loud")]).unwrap();
        assert!(config.filter().is_err());
        let config = from_pairs(&[("RUST_LOG", "portfolio_charts=debug,tower_http=info")]).unwrap();
        assert!(config.filter().is_ok());
    }
}
