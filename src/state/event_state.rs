//! Events of the selected series.

use crate::api::{Event, Market};

/// An event together with its liquid markets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventWithMarkets {
    pub event: Event,
    pub markets: Vec<Market>,
}

/// State for the events panel.
#[derive(Debug, Default)]
pub struct EventState {
    /// Series whose events are shown (or being fetched).
    pub series_ticker: Option<String>,
    /// Loaded events, in exchange order.
    pub events: Vec<EventWithMarkets>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Last fetch failure for the current series.
    pub error: Option<String>,
    /// Bumped each time a fetch begins.
    pub generation: u64,
}

impl EventState {
    /// Start fetching events for `series_ticker`, dropping the previous ones.
    pub fn begin(&mut self, series_ticker: String) {
        self.series_ticker = Some(series_ticker);
        self.events.clear();
        self.error = None;
        self.loading = true;
        self.generation += 1;
    }

    /// Whether a result for `series_ticker` is still wanted.
    pub fn is_current(&self, series_ticker: &str) -> bool {
        self.series_ticker.as_deref() == Some(series_ticker)
    }

    /// Total markets across loaded events.
    pub fn market_count(&self) -> usize {
        self.events.iter().map(|e| e.markets.len()).sum()
    }
}
