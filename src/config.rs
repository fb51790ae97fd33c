use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::errors::ChartError;
use crate::models::Period;

/// How a stock chart reacts to responses that arrive out of order when the
/// period is changed faster than the backend answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Apply every successful response as it arrives, so the last response
    /// to land is shown even if it answers an older request.
    #[default]
    LastResponseWins,
    /// Drop responses older than the newest one already applied.
    NewestRequestWins,
}

impl FromStr for RefreshPolicy {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-response-wins" => Ok(RefreshPolicy::LastResponseWins),
            "newest-request-wins" => Ok(RefreshPolicy::NewestRequestWins),
            other => Err(ChartError::Config(format!(
                "Invalid REFRESH_POLICY: {}. Must be 'last-response-wins' or 'newest-request-wins'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartsConfig {
    pub stock_api_url: Url,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub refresh_policy: RefreshPolicy,
    pub default_period: Period,
    /// Most stock pages tracked at once.
    pub stock_page_limit: usize,
    /// A stock page unused for this long is dropped with its charts.
    pub stock_page_idle: Duration,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            stock_api_url: Url::parse("http://127.0.0.1:5000/").expect("default backend URL is valid"),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            request_timeout: Duration::from_secs(10),
            refresh_policy: RefreshPolicy::default(),
            default_period: Period::default(),
            stock_page_limit: 256,
            stock_page_idle: Duration::from_secs(30 * 60),
        }
    }
}

impl ChartsConfig {
    pub fn from_env() -> Result<Self, ChartError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChartError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("STOCK_API_URL") {
            config.stock_api_url = parse_base_url(&raw)?;
        }

        if let Some(raw) = lookup("BIND_ADDR") {
            config.bind_addr = raw
                .parse()
                .map_err(|e| ChartError::Config(format!("Invalid BIND_ADDR '{}': {}", raw, e)))?;
        }

        if let Some(raw) = lookup("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_positive("REQUEST_TIMEOUT_SECS", &raw)?);
        }

        if let Some(raw) = lookup("STOCK_PAGE_LIMIT") {
            config.stock_page_limit = parse_positive("STOCK_PAGE_LIMIT", &raw)? as usize;
        }

        if let Some(raw) = lookup("STOCK_PAGE_IDLE_SECS") {
            config.stock_page_idle = Duration::from_secs(parse_positive("STOCK_PAGE_IDLE_SECS", &raw)?);
        }

        if let Some(raw) = lookup("REFRESH_POLICY") {
            config.refresh_policy = raw.parse()?;
        }

        if let Some(raw) = lookup("DEFAULT_PERIOD") {
            config.default_period = raw.parse().map_err(ChartError::Config)?;
        }

        Ok(config)
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u64, ChartError> {
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|e| ChartError::Config(format!("Invalid {} '{}': {}", key, raw, e)))?;
    if value == 0 {
        return Err(ChartError::Config(format!("{} must be positive", key)));
    }
    Ok(value)
}

/// Normalised to end with `/`; endpoint segments are appended after it.
fn parse_base_url(raw: &str) -> Result<Url, ChartError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&normalized)
        .map_err(|e| ChartError::Config(format!("Invalid STOCK_API_URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ChartError::Config(format!("STOCK_API_URL '{}' cannot be a base URL", raw)));
    }
    Ok(url)
}
