//! Series list panel.

use crate::state::Store;
use crate::term::{AnsiColor, BorderStyle, Style, color, pad_right, truncate};
use crate::ui::Theme;

use chrono::Local;

const COL_TICKER: usize = 12;
const COL_CATEGORY: usize = 18;
const COL_TITLE: usize = 30;

/// The left panel: one row per series, selection highlighted.
pub struct SeriesList;

impl SeriesList {
    /// Render the panel with at most `max_rows` series rows.
    pub fn render(store: &Store, theme: &Theme, width: usize, max_rows: usize) -> String {
        let state = &store.series;
        let mut lines = Vec::with_capacity(max_rows + 3);

        let title = Style::new().bold().underline().render("Series List");
        match state.last_updated {
            Some(at) => {
                let updated = at.with_timezone(&Local).format("%H:%M:%S");
                let updated = color(&format!("  updated {updated}"), theme.muted);
                lines.push(format!("{title}{updated}"));
            }
            None => lines.push(title),
        }
        lines.push(format!(
            "{}{}{}",
            color(&pad_right("Ticker", COL_TICKER), theme.primary),
            color(&pad_right("Category", COL_CATEGORY), theme.secondary),
            color(&pad_right("Title", COL_TITLE), theme.accent),
        ));
        lines.push(color(&"-".repeat(COL_TICKER + COL_CATEGORY + COL_TITLE), theme.muted));

        let start = state.window_start(max_rows);
        let selected = Style::new()
            .background(AnsiColor::Blue)
            .foreground(AnsiColor::White)
            .bold();
        let normal = Style::new().foreground(AnsiColor::White);

        for (i, series) in state.series.iter().enumerate().skip(start).take(max_rows) {
            let is_selected = i == state.selected_index;
            let row = format!(
                "{}{}{}{}",
                if is_selected { "> " } else { "  " },
                pad_right(truncate(&series.ticker, COL_TICKER - 1), COL_TICKER),
                pad_right(truncate(&series.category, COL_CATEGORY - 1), COL_CATEGORY),
                pad_right(truncate(&series.title, COL_TITLE), COL_TITLE),
            );
            let style = if is_selected { &selected } else { &normal };
            lines.push(style.render(&row));
        }

        let hidden = state.series.len().saturating_sub(start + max_rows);
        if hidden > 0 {
            lines.push(color(&format!("  ... {hidden} more"), theme.muted));
        }

        Style::new()
            .border(BorderStyle::Rounded)
            .border_foreground(theme.primary)
            .padding((0, 1))
            .width(width)
            .render(&lines.join("\n"))
    }
}
