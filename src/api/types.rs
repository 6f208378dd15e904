//! Kalshi REST payloads and query parameters.
//!
//! Prices are integer cents, as the exchange reports them. Unknown fields are
//! ignored and missing ones fall back to defaults, since the exchange adds
//! fields freely.

use chrono::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeStatus {
    pub exchange_active: bool,
    pub trading_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    /// Available balance in cents.
    pub balance: i64,
}

impl Balance {
    /// The balance in dollars.
    pub fn dollars(&self) -> Decimal {
        Decimal::new(self.balance, 2)
    }
}

/// A family of recurring events, such as a city's daily high temperature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Series {
    pub ticker: String,
    pub title: String,
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub frequency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub event_ticker: String,
    pub series_ticker: String,
    pub title: String,
    pub sub_title: String,
    pub category: String,
    pub strike_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Market {
    pub ticker: String,
    pub event_ticker: String,
    pub title: String,
    pub subtitle: String,
    pub status: String,
    pub yes_bid: i64,
    pub yes_ask: i64,
    pub last_price: i64,
    pub volume: i64,
    pub open_interest: i64,
    pub liquidity: i64,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub expiration_time: Option<String>,
}

impl Market {
    /// The last `-` separated segment of the ticker, e.g. `B45.5`.
    pub fn short_ticker(&self) -> &str {
        self.ticker.rsplit('-').next().unwrap_or(&self.ticker)
    }

    pub fn has_liquidity(&self) -> bool {
        self.liquidity > 0
    }

    /// Opening time as `HH:MM`, or `N/A`.
    pub fn open_clock(&self) -> String {
        clock(self.open_time.as_deref())
    }

    /// Closing time as `HH:MM`, or `N/A`.
    pub fn close_clock(&self) -> String {
        clock(self.close_time.as_deref())
    }
}

/// `HH:MM` in the timestamp's own offset.
fn clock(timestamp: Option<&str>) -> String {
    let Some(ts) = timestamp.filter(|ts| !ts.is_empty()) else {
        return "N/A".to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(ts) {
        return parsed.format("%H:%M").to_string();
    }

    match ts.split_once('T') {
        Some((_, time)) if !time.is_empty() => time.chars().take(5).collect(),
        _ => "N/A".to_string(),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeriesResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MarketsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub markets: Vec<Market>,
    pub cursor: Option<String>,
}

impl MarketsResponse {
    /// The cursor for the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl SeriesQuery {
    pub fn new(category: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            tags: Some(tags.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl EventsQuery {
    /// Open events of one series.
    pub fn open_for_series(series_ticker: impl Into<String>) -> Self {
        Self {
            series_ticker: Some(series_ticker.into()),
            status: Some("open".to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl MarketsQuery {
    pub fn for_event(event_ticker: impl Into<String>) -> Self {
        Self {
            event_ticker: Some(event_ticker.into()),
            ..Self::default()
        }
    }
}
