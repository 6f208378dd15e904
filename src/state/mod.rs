//! State management for kalshi-tui.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Fetch results come
//! back as actions, so every state change goes through [`Store::reduce`].

mod app_state;
mod event_state;
mod series_state;

pub use app_state::AppState;
pub use event_state::{EventState, EventWithMarkets};
pub use series_state::SeriesState;

use crate::api::Series;
use crate::error::Result;
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Series list
    LoadSeries,
    SeriesLoaded(Vec<Series>),
    SeriesFailed(String),

    // Navigation
    ScrollUp,
    ScrollDown,
    /// Open the selected series.
    SelectSeries,

    // Events panel
    EventsLoaded {
        series_ticker: String,
        events: Vec<EventWithMarkets>,
    },
    EventsFailed {
        series_ticker: String,
        error: String,
    },

    // UI actions
    ToggleHelp,
    CloseHelp,
    RefreshAll,

    // Error handling
    SetError(String),
    ClearError,

    // Quit
    Quit,
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Series list.
    pub series: SeriesState,
    /// Events of the selected series.
    pub events: EventState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::new(),
            series: SeriesState::default(),
            events: EventState::default(),
            action_tx,
        }
    }

    /// A sender background tasks can report results through.
    pub fn sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::LoadSeries | Action::RefreshAll => {
                self.series.loading = true;
                self.series.error = None;
            }
            Action::SeriesLoaded(series) => {
                self.app.status = Some(format!("Loaded {} series", series.len()));
                self.series.series = series;
                self.series.loading = false;
                self.series.error = None;
                self.series.last_updated = Some(chrono::Utc::now());
                if self.series.selected_index >= self.series.series.len() {
                    self.series.selected_index = 0;
                }
            }
            Action::SeriesFailed(error) => {
                self.series.loading = false;
                self.series.error = Some(error);
            }

            Action::ScrollUp => self.series.step(false),
            Action::ScrollDown => self.series.step(true),
            Action::SelectSeries => {
                if !self.series.can_navigate() {
                    return;
                }
                if let Some(ticker) = self.series.selected().map(|s| s.ticker.clone()) {
                    self.app.status = Some(format!("Loading events for {ticker}..."));
                    self.events.begin(ticker);
                }
            }

            Action::EventsLoaded {
                series_ticker,
                events,
            } => {
                if !self.events.is_current(&series_ticker) {
                    tracing::debug!(%series_ticker, "dropping stale events");
                    return;
                }
                self.events.events = events;
                self.events.loading = false;
                self.app.status = Some(format!(
                    "{}: {} events, {} liquid markets",
                    series_ticker,
                    self.events.events.len(),
                    self.events.market_count()
                ));
            }
            Action::EventsFailed {
                series_ticker,
                error,
            } => {
                if self.events.is_current(&series_ticker) {
                    self.events.loading = false;
                    self.events.error = Some(error);
                }
            }

            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::CloseHelp => self.app.show_help = false,

            Action::SetError(error) => self.app.error = Some(error),
            Action::ClearError => self.app.error = None,

            Action::Quit => self.app.should_quit = true,
        }
    }
}
