//! Frame composition for the browser.
//!
//! Widgets render bordered blocks, the blocks are joined into one body, and
//! the body is written row by row into a [`ScreenBuffer`], which repaints only
//! rows that changed.

mod layout;
mod theme;
mod widgets;

pub use layout::Layout;
pub use theme::Theme;
pub use widgets::{EventPanel, HelpPanel, SeriesList, StatusBar, market_headers, market_row};

use crate::config::{Config, KeyBindings, UiConfig};
use crate::state::Store;
use crate::term::{Align, ScreenBuffer, Style, VAlign, color, join_horizontal, join_vertical, place};
use std::io::{self, Write};

/// Main UI renderer.
#[derive(Debug, Clone)]
pub struct Ui {
    theme: Theme,
    config: UiConfig,
    keys: KeyBindings,
}

impl Ui {
    pub fn new(config: &Config) -> Self {
        Self {
            theme: Theme::from_config(&config.theme),
            config: config.ui.clone(),
            keys: config.keybindings.clone(),
        }
    }

    /// Draw a full frame and flush the changed rows.
    pub fn draw<W: Write>(&self, screen: &mut ScreenBuffer<W>, store: &Store) -> io::Result<usize> {
        screen.clear();
        let layout = Layout::new(screen.width(), screen.height());

        screen.write_line(layout.title_row, &self.title(&layout));
        screen.write_line(layout.hint_row, &self.hint(&layout));

        let body = if store.app.show_help {
            place(
                layout.width,
                layout.body_height(),
                Align::Center,
                VAlign::Center,
                &HelpPanel::render(&self.theme, &self.keys),
            )
        } else {
            indent(&self.body(store, &layout), layout.indent)
        };
        screen.write_block(layout.body_row, &body);

        screen.flush()
    }

    fn title(&self, layout: &Layout) -> String {
        let title = Style::new()
            .bold()
            .foreground(self.theme.primary)
            .render("Kalshi TUI");
        indent(&title, layout.indent)
    }

    fn hint(&self, layout: &Layout) -> String {
        let hint = format!(
            "Use Up/Down to navigate, '{}' to view events, '{}' for help, '{}' to exit",
            self.keys.select, self.keys.help, self.keys.quit
        );
        indent(&color(&hint, self.theme.muted), layout.indent)
    }

    /// Panels and footer, without the left indent.
    pub fn body(&self, store: &Store, layout: &Layout) -> String {
        let series = &store.series;
        if series.loading && series.series.is_empty() {
            return color("Loading series data...", self.theme.warning);
        }
        if let Some(error) = &series.error {
            return color(&format!("Error: {error}"), self.theme.error);
        }

        let rows = self.config.max_series_rows.min(layout.body_height().saturating_sub(8).max(1));
        let left = SeriesList::render(store, &self.theme, layout.series_width, rows);
        let right = EventPanel::render(store, &self.theme, &self.config, layout.events_width);
        let main = if layout.stacked {
            join_vertical(Align::Left, 0, &[left, right])
        } else {
            join_horizontal(VAlign::Top, layout.gap, &[left, right])
        };

        let footer = StatusBar::render(store, &self.theme, layout.footer_width);
        join_vertical(Align::Left, 0, &[main, footer])
    }
}

fn indent(block: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    block
        .split('\n')
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Series;
    use crate::state::Action;
    use crate::term::strip_ansi;
    use tokio::sync::mpsc;

    fn create_test_store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    fn loaded_store() -> Store {
        let mut store = create_test_store();
        store.reduce(Action::SeriesLoaded(vec![
            Series {
                ticker: "KXHIGHNY".to_string(),
                title: "Highest temperature in NYC".to_string(),
                category: "Climate and Weather".to_string(),
                ..Series::default()
            },
            Series {
                ticker: "KXHIGHCHI".to_string(),
                ..Series::default()
            },
        ]));
        store
    }

    fn screen_text(screen: &ScreenBuffer<Vec<u8>>) -> String {
        strip_ansi(&String::from_utf8_lossy(screen.get_ref()))
    }

    #[test]
    fn test_loading_body() {
        let ui = Ui::new(&Config::default());
        let mut store = create_test_store();
        store.reduce(Action::LoadSeries);
        let body = ui.body(&store, &Layout::new(200, 50));
        assert_eq!(strip_ansi(&body), "Loading series data...");
    }

    #[test]
    fn test_error_body() {
        let ui = Ui::new(&Config::default());
        let mut store = create_test_store();
        store.reduce(Action::SeriesFailed("Kalshi API error [401]: Unauthorized".to_string()));
        let body = ui.body(&store, &Layout::new(200, 50));
        assert_eq!(strip_ansi(&body), "Error: Kalshi API error [401]: Unauthorized");
    }

    #[test]
    fn test_side_by_side_body() {
        let ui = Ui::new(&Config::default());
        let store = loaded_store();
        let body = strip_ansi(&ui.body(&store, &Layout::new(200, 50)));
        let first = body.lines().next().unwrap();

        // Two rounded panels on one row, gap 2.
        assert!(first.starts_with('╭'));
        assert_eq!(first.matches('╭').count(), 2);
        assert!(body.contains("Selected: KXHIGHNY (1/2)"));
    }

    #[test]
    fn test_stacked_body_on_narrow_terminal() {
        let ui = Ui::new(&Config::default());
        let store = loaded_store();
        let body = strip_ansi(&ui.body(&store, &Layout::new(100, 80)));
        assert!(body.lines().all(|l| l.matches('╭').count() <= 1));
        assert!(body.contains("Select a series and press Enter"));
    }

    #[test]
    fn test_draw_writes_title_and_repaints_only_changes() {
        let ui = Ui::new(&Config::default());
        let mut store = loaded_store();
        let mut screen = ScreenBuffer::new(Vec::new(), 200, 50);

        let first = ui.draw(&mut screen, &store).unwrap();
        assert_eq!(first, 50);
        let text = screen_text(&screen);
        assert!(text.contains("  Kalshi TUI"));
        assert!(text.contains("'Enter' to view events"));

        // Same state: nothing to repaint.
        assert_eq!(ui.draw(&mut screen, &store).unwrap(), 0);

        store.reduce(Action::ScrollDown);
        let changed = ui.draw(&mut screen, &store).unwrap();
        assert!(changed > 0 && changed < 10, "repainted {changed} rows");
    }

    #[test]
    fn test_help_overlay_is_centered() {
        let ui = Ui::new(&Config::default());
        let mut store = loaded_store();
        store.reduce(Action::ToggleHelp);
        let mut screen = ScreenBuffer::new(Vec::new(), 120, 40);
        ui.draw(&mut screen, &store).unwrap();

        let text = screen_text(&screen);
        assert!(text.contains("Toggle this help"));
        assert!(!text.contains("Series List"));
    }
}
