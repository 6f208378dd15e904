//! Events panel: the selected series' events with market tables.

use crate::api::Market;
use crate::config::UiConfig;
use crate::state::{EventWithMarkets, Store};
use crate::term::{AnsiColor, BorderStyle, Style, TableOptions, color, render_table};
use crate::ui::Theme;

/// The right panel.
pub struct EventPanel;

impl EventPanel {
    pub fn render(store: &Store, theme: &Theme, ui: &UiConfig, width: usize) -> String {
        let lines = Self::content(store, theme, ui);
        Style::new()
            .border(BorderStyle::Rounded)
            .border_foreground(theme.secondary)
            .padding((0, 1))
            .width(width)
            .render(&lines.join("\n"))
    }

    fn content(store: &Store, theme: &Theme, ui: &UiConfig) -> Vec<String> {
        let state = &store.events;
        let Some(series_ticker) = &state.series_ticker else {
            return vec![color("Select a series and press Enter", theme.muted)];
        };

        let mut lines = vec![
            Style::new()
                .bold()
                .underline()
                .render(&format!("Events for {series_ticker}")),
        ];

        if state.loading {
            lines.push(color("Loading events...", theme.warning));
            return lines;
        }
        if let Some(error) = &state.error {
            lines.push(color(&format!("Failed to load events: {error}"), theme.error));
            return lines;
        }
        if state.events.is_empty() {
            lines.push(color("No open events found.", theme.muted));
            return lines;
        }

        for item in state.events.iter().take(ui.events_shown) {
            lines.extend(Self::event_block(item, theme, ui.markets_per_event));
            lines.push(String::new());
        }

        let hidden = state.events.len().saturating_sub(ui.events_shown);
        if hidden > 0 {
            lines.push(color(&format!("+{hidden} more events"), theme.muted));
        }
        lines
    }

    fn event_block(item: &EventWithMarkets, theme: &Theme, max_markets: usize) -> Vec<String> {
        let event = &item.event;
        let mut lines = vec![
            color(&format!("• {} ({})", event.title, event.event_ticker), theme.accent),
            color(
                &format!("  Date: {}", event.strike_date.as_deref().unwrap_or("N/A")),
                theme.muted,
            ),
        ];

        if item.markets.is_empty() {
            lines.push(color("  No markets", theme.muted));
            return lines;
        }

        let options = TableOptions::new()
            .border(BorderStyle::Rounded)
            .border_color(theme.border);
        let rows: Vec<Vec<String>> = item
            .markets
            .iter()
            .take(max_markets)
            .map(market_row)
            .collect();
        let table = render_table(&market_headers(theme), &rows, &options);
        if !table.is_empty() {
            lines.push(table);
        }
        lines
    }
}

/// Column headers for market tables, colored per column.
pub fn market_headers(theme: &Theme) -> Vec<String> {
    vec![
        color("Ticker", theme.primary),
        color("Title", theme.accent),
        color("Bid", AnsiColor::Green),
        color("Ask", AnsiColor::Red),
        color("Last", AnsiColor::Yellow),
        color("Liq", AnsiColor::Blue),
        color("Vol", AnsiColor::Magenta),
        color("Open", theme.muted),
        color("Close", theme.muted),
    ]
}

/// One table row; times are shortened to `HH:MM`.
pub fn market_row(market: &Market) -> Vec<String> {
    vec![
        market.short_ticker().to_string(),
        market.title.clone(),
        market.yes_bid.to_string(),
        market.yes_ask.to_string(),
        market.last_price.to_string(),
        market.liquidity.to_string(),
        market.volume.to_string(),
        market.open_clock(),
        market.close_clock(),
    ]
}
