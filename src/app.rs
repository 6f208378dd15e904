//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering. API calls run on spawned
//! tasks and report back through the store's action channel, so the screen
//! keeps redrawing while requests are in flight.

use crate::api::{
    EventsQuery, Market, MarketApi, MarketsQuery, SeriesQuery, get_all_markets,
};
use crate::config::{Config, UiConfig};
use crate::error::{Error, Result};
use crate::events::{EventHandler, EventStream};
use crate::state::{Action, EventWithMarkets, Store};
use crate::term::ScreenBuffer;
use crate::ui::Ui;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use std::io::{Stdout, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Smallest terminal the panels are usable in.
const MIN_WIDTH: u16 = 80;
const MIN_HEIGHT: u16 = 20;

/// The main application.
pub struct App {
    /// Screen buffer over stdout.
    screen: ScreenBuffer<Stdout>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Market data source.
    api: Arc<dyn MarketApi>,
    /// Frame renderer.
    ui: Ui,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application and take over the terminal.
    pub fn new(config: Config, api: Arc<dyn MarketApi>) -> Result<Self> {
        // Parse bindings before touching the terminal.
        let event_handler = EventHandler::new(&config.keybindings)?;

        enable_raw_mode()
            .map_err(|e| Error::terminal(format!("could not enable raw mode: {e}")))?;
        let mut screen = ScreenBuffer::stdout();
        if let Err(e) = enter_screen(&mut screen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let event_handler = event_handler.with_resize_handle(screen.resize_handle());

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let store = Store::new(action_tx);

        Ok(Self {
            screen,
            store,
            event_handler,
            action_rx,
            api,
            ui: Ui::new(&config),
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut events = EventStream::new();
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms.max(10));
        let mut tick = tokio::time::interval(tick_rate);

        self.store.dispatch(Action::LoadSeries)?;

        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            self.ui.draw(&mut self.screen, &self.store)?;
            self.check_size();

            tokio::select! {
                // Handle terminal events
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(action) = self.event_handler.handle_event(event) {
                            self.handle_action(action);
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                // Redraw periodically so resizes land even without input
                _ = tick.tick() => {}
            }

            // Check if we should quit
            if self.store.app.should_quit {
                tracing::info!("quit requested");
                break;
            }
        }

        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::LoadSeries | Action::RefreshAll => {
                self.store.reduce(action);
                self.spawn_series_fetch();
            }
            Action::SelectSeries => {
                if let Some(ticker) = select_series(&mut self.store) {
                    self.spawn_events_fetch(ticker);
                }
            }
            _ => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }
    }

    /// Flag a terminal that is too small in the footer, and clear the flag
    /// once it grows back.
    fn check_size(&mut self) {
        let (width, height) = (self.screen.width(), self.screen.height());
        let too_small = width < MIN_WIDTH || height < MIN_HEIGHT;
        match (too_small, self.store.app.error.is_some()) {
            (true, false) => {
                tracing::warn!(width, height, "terminal too small");
                self.store.reduce(Action::SetError(format!(
                    "Terminal too small: {width}x{height}, need {MIN_WIDTH}x{MIN_HEIGHT}"
                )));
            }
            (false, true) => self.store.reduce(Action::ClearError),
            _ => {}
        }
    }

    fn spawn_series_fetch(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.store.sender();
        let ui = self.config.ui.clone();
        tokio::spawn(async move {
            let _ = tx.send(load_series(api.as_ref(), &ui).await);
        });
    }

    fn spawn_events_fetch(&self, series_ticker: String) {
        let api = Arc::clone(&self.api);
        let tx = self.store.sender();
        let max_events = self.config.ui.max_events;
        tokio::spawn(async move {
            let _ = tx.send(load_events(api.as_ref(), series_ticker, max_events).await);
        });
    }
}

/// Switch to the alternate screen.
fn enter_screen<W: Write>(screen: &mut ScreenBuffer<W>) -> Result<()> {
    screen
        .enter_alt_screen()
        .map_err(|e| Error::terminal(format!("could not enter alternate screen: {e}")))
}

/// Reduce a selection and return the series to fetch, if a new fetch began.
/// A blocked selection leaves any fetch already in flight alone.
fn select_series(store: &mut Store) -> Option<String> {
    let generation = store.events.generation;
    store.reduce(Action::SelectSeries);
    if store.events.generation == generation {
        return None;
    }
    store.events.series_ticker.clone()
}

/// Fetch the configured series list.
pub async fn load_series(api: &dyn MarketApi, ui: &UiConfig) -> Action {
    let query = SeriesQuery::new(&ui.series_category, &ui.series_tags);
    match api.get_series(query).await {
        Ok(response) => {
            tracing::info!(count = response.series.len(), "loaded series");
            Action::SeriesLoaded(response.series)
        }
        Err(e) => {
            if e.is_recoverable() {
                tracing::warn!(error = %e, "failed to load series, press refresh to retry");
            } else {
                tracing::error!(error = %e, "failed to load series");
            }
            Action::SeriesFailed(e.to_string())
        }
    }
}

/// Fetch open events of a series and, for the first `max_events`, their
/// liquid markets one event at a time. A market failure leaves that event
/// with no markets.
pub async fn load_events(
    api: &dyn MarketApi,
    series_ticker: String,
    max_events: usize,
) -> Action {
    let events = match api.get_events(EventsQuery::open_for_series(&series_ticker)).await {
        Ok(response) => response.events,
        Err(e) => {
            tracing::error!(%series_ticker, error = %e, "failed to load events");
            return Action::EventsFailed {
                series_ticker,
                error: e.to_string(),
            };
        }
    };

    let mut loaded = Vec::with_capacity(events.len().min(max_events));
    for event in events.into_iter().take(max_events) {
        let query = MarketsQuery::for_event(&event.event_ticker);
        let markets = match get_all_markets(api, query).await {
            Ok(markets) => markets.into_iter().filter(Market::has_liquidity).collect(),
            Err(e) => {
                tracing::warn!(event = %event.event_ticker, error = %e, "failed to load markets");
                Vec::new()
            }
        };
        loaded.push(EventWithMarkets { event, markets });
    }

    Action::EventsLoaded {
        series_ticker,
        events: loaded,
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = self.screen.exit_alt_screen();
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        Event, EventsResponse, MarketsResponse, MockMarketApi, Series, SeriesResponse,
    };
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn market(ticker: &str, liquidity: i64) -> Market {
        Market {
            ticker: ticker.to_string(),
            liquidity,
            ..Market::default()
        }
    }

    fn events(tickers: &[&str]) -> EventsResponse {
        EventsResponse {
            events: tickers
                .iter()
                .map(|t| Event {
                    event_ticker: t.to_string(),
                    ..Event::default()
                })
                .collect(),
            cursor: None,
        }
    }

    #[tokio::test]
    async fn test_load_series_queries_configured_filters() {
        let mut api = MockMarketApi::new();
        api.expect_get_series()
            .withf(|q| {
                q.category.as_deref() == Some("Climate and Weather")
                    && q.tags.as_deref() == Some("Daily temperature")
            })
            .times(1)
            .returning(|_| {
                Ok(SeriesResponse {
                    series: vec![Series {
                        ticker: "KXHIGHNY".to_string(),
                        ..Series::default()
                    }],
                })
            });

        let action = load_series(&api, &UiConfig::default()).await;
        assert!(matches!(action, Action::SeriesLoaded(ref s) if s.len() == 1));
    }

    #[tokio::test]
    async fn test_load_series_failure() {
        let mut api = MockMarketApi::new();
        api.expect_get_series()
            .returning(|_| Err(Error::api(401, "Unauthorized")));

        let action = load_series(&api, &UiConfig::default()).await;
        assert_eq!(
            action,
            Action::SeriesFailed("Kalshi API error [401]: Unauthorized".to_string())
        );
    }

    #[tokio::test]
    async fn test_load_events_limits_and_filters() {
        let mut api = MockMarketApi::new();
        api.expect_get_events()
            .withf(|q| {
                q.series_ticker.as_deref() == Some("KXHIGHNY")
                    && q.status.as_deref() == Some("open")
            })
            .times(1)
            .returning(|_| Ok(events(&["E1", "E2", "E3", "E4", "E5", "E6", "E7"])));
        api.expect_get_markets()
            .times(5)
            .returning(|q| {
                let event = q.event_ticker.unwrap_or_default();
                if event == "E2" {
                    return Err(Error::api(500, "boom"));
                }
                Ok(MarketsResponse {
                    markets: vec![
                        market(&format!("{event}-A"), 10),
                        market(&format!("{event}-B"), 0),
                    ],
                    cursor: None,
                })
            });

        let action = load_events(&api, "KXHIGHNY".to_string(), 5).await;
        let Action::EventsLoaded {
            series_ticker,
            events,
        } = action
        else {
            panic!("expected EventsLoaded, got {action:?}");
        };

        assert_eq!(series_ticker, "KXHIGHNY");
        let tickers: Vec<_> = events.iter().map(|e| e.event.event_ticker.as_str()).collect();
        assert_eq!(tickers, vec!["E1", "E2", "E3", "E4", "E5"]);
        // Only liquid markets survive; a failed fetch leaves the event empty.
        assert_eq!(events[0].markets.len(), 1);
        assert_eq!(events[0].markets[0].ticker, "E1-A");
        assert!(events[1].markets.is_empty());
    }

    #[tokio::test]
    async fn test_load_events_failure() {
        let mut api = MockMarketApi::new();
        api.expect_get_events()
            .returning(|_| Err(Error::api(503, "unavailable")));
        api.expect_get_markets().never();

        let action = load_events(&api, "KXHIGHNY".to_string(), 5).await;
        assert_eq!(
            action,
            Action::EventsFailed {
                series_ticker: "KXHIGHNY".to_string(),
                error: "Kalshi API error [503]: unavailable".to_string(),
            }
        );
    }

    #[test]
    fn test_loaded_events_reach_the_store() {
        let mut api = MockMarketApi::new();
        api.expect_get_events().returning(|_| Ok(events(&["E1"])));
        api.expect_get_markets().returning(|_| {
            Ok(MarketsResponse {
                markets: vec![market("E1-A", 5)],
                cursor: None,
            })
        });

        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::SeriesLoaded(vec![Series {
            ticker: "KXHIGHNY".to_string(),
            ..Series::default()
        }]));
        store.reduce(Action::SelectSeries);

        let action = tokio_test::block_on(load_events(&api, "KXHIGHNY".to_string(), 5));
        store.reduce(action);
        assert!(!store.events.loading);
        assert_eq!(store.events.market_count(), 1);
    }

    #[test]
    fn test_blocked_selection_does_not_refetch() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::SeriesLoaded(vec![Series {
            ticker: "KXHIGHNY".to_string(),
            ..Series::default()
        }]));

        assert_eq!(select_series(&mut store).as_deref(), Some("KXHIGHNY"));
        assert!(store.events.loading);

        // A refresh blocks navigation while the events fetch is still running.
        store.reduce(Action::RefreshAll);
        assert_eq!(select_series(&mut store), None);
        assert!(store.events.loading);
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_screen_setup_failure_is_terminal_error() {
        let mut screen = ScreenBuffer::new(ClosedSink, 80, 24);
        let err = enter_screen(&mut screen).unwrap_err();
        assert!(matches!(err, Error::Terminal(_)));
        assert!(err.to_string().starts_with("Terminal error: could not enter alternate screen"));
    }
}
