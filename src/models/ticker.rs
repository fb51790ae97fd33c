use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static TICKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.\-^=]{1,15}$").expect("ticker pattern is valid")
});

/// A stock symbol, normalised to upper case. Only characters that are safe
/// to place in a URL path segment are accepted, and at least one of them
/// must be a letter or digit so `.` and `..` never reach a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if !TICKER_RE.is_match(trimmed) || !trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(format!("Invalid ticker: '{}'", raw));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Takes the ticker from the last segment of a page path such as
    /// `/stocks/aapl`.
    pub fn from_page_path(path: &str) -> Result<Self, String> {
        let segment = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        Self::parse(segment)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Ticker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Ticker {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ticker::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// History window requested from the stock chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl Period {
    pub const ALL: [Period; 11] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::YearToDate,
        Period::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| format!("Invalid period: '{}'", s))
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_is_uppercased() {
        assert_eq!(Ticker::parse(" aapl ").unwrap().as_str(), "AAPL");
        assert_eq!(Ticker::parse("BRK.B").unwrap().as_str(), "BRK.B");
    }

    #[test]
    fn test_ticker_rejects_path_characters() {
        assert!(Ticker::parse("").is_err());
        assert!(Ticker::parse("../admin").is_err());
        assert!(Ticker::parse("AAPL?period=1y").is_err());
    }

    #[test]
    fn test_ticker_needs_a_letter_or_digit() {
        for raw in [".", "..", "...", "-", "^", "=.="] {
            assert!(Ticker::parse(raw).is_err(), "{} should be rejected", raw);
        }
        assert_eq!(Ticker::parse("^GSPC").unwrap().as_str(), "^GSPC");
        assert_eq!(Ticker::parse("eurusd=x").unwrap().as_str(), "EURUSD=X");
    }

    #[test]
    fn test_ticker_from_page_path() {
        assert_eq!(Ticker::from_page_path("/stocks/msft").unwrap().as_str(), "MSFT");
        assert_eq!(Ticker::from_page_path("/stocks/msft/").unwrap().as_str(), "MSFT");
        assert!(Ticker::from_page_path("/").is_err());
    }

    #[test]
    fn test_period_round_trips_through_str() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        assert_eq!("1Y".parse::<Period>().unwrap(), Period::OneYear);
        assert!("3w".parse::<Period>().is_err());
        assert_eq!(Period::default(), Period::OneYear);
    }
}
