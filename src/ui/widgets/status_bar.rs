//! Footer status box.

use crate::state::Store;
use crate::term::{BorderStyle, Style, color};
use crate::ui::Theme;

/// Status box under the panels.
pub struct StatusBar;

impl StatusBar {
    pub fn render(store: &Store, theme: &Theme, width: usize) -> String {
        Style::new()
            .border(BorderStyle::Rounded)
            .border_foreground(theme.warning)
            .padding((0, 1))
            .width(width)
            .render(&Self::line(store, theme))
    }

    /// The single line of footer text.
    fn line(store: &Store, theme: &Theme) -> String {
        if let Some(error) = &store.app.error {
            return color(error, theme.error);
        }

        let series = &store.series;
        let text = if series.loading {
            "Fetching...".to_string()
        } else if series.error.is_some() {
            "Failed".to_string()
        } else {
            let ticker = series.selected().map_or("None", |s| s.ticker.as_str());
            let position = if series.series.is_empty() {
                String::new()
            } else {
                format!(" ({}/{})", series.selected_index + 1, series.series.len())
            };
            match &store.app.status {
                Some(status) => format!("Selected: {ticker}{position} | {status}"),
                None => format!("Selected: {ticker}{position}"),
            }
        };
        color(&text, theme.warning)
    }
}
