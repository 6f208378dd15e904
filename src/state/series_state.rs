//! Series list state.

use crate::api::Series;
use chrono::{DateTime, Utc};

/// State for the series list panel.
#[derive(Debug, Default)]
pub struct SeriesState {
    /// All loaded series.
    pub series: Vec<Series>,
    /// Selected row.
    pub selected_index: usize,
    /// Whether the list is loading.
    pub loading: bool,
    /// Load failure, shown in place of the list.
    pub error: Option<String>,
    /// Last successful load.
    pub last_updated: Option<DateTime<Utc>>,
}

impl SeriesState {
    pub fn selected(&self) -> Option<&Series> {
        self.series.get(self.selected_index)
    }

    /// Navigation is disabled while loading, after an error, or when empty.
    pub fn can_navigate(&self) -> bool {
        !self.loading && self.error.is_none() && !self.series.is_empty()
    }

    /// Move the selection by one row, wrapping at both ends.
    pub fn step(&mut self, forward: bool) {
        if !self.can_navigate() {
            return;
        }
        let len = self.series.len();
        self.selected_index = if forward {
            (self.selected_index + 1) % len
        } else {
            (self.selected_index + len - 1) % len
        };
    }

    /// First row of a `rows`-high window that keeps the selection visible.
    pub fn window_start(&self, rows: usize) -> usize {
        if rows == 0 || self.selected_index < rows {
            0
        } else {
            self.selected_index + 1 - rows
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(n: usize) -> SeriesState {
        SeriesState {
            series: (0..n)
                .map(|i| Series {
                    ticker: format!("S{i}"),
                    ..Series::default()
                })
                .collect(),
            ..SeriesState::default()
        }
    }

    #[test]
    fn test_step_wraps_both_ways() {
        let mut state = loaded(3);
        state.step(false);
        assert_eq!(state.selected_index, 2);
        state.step(true);
        assert_eq!(state.selected_index, 0);
        state.step(true);
        state.step(true);
        assert_eq!(state.selected().map(|s| s.ticker.as_str()), Some("S2"));
    }

    #[test]
    fn test_step_ignored_when_not_navigable() {
        let mut empty = SeriesState::default();
        empty.step(true);
        assert_eq!(empty.selected_index, 0);

        let mut loading = loaded(3);
        loading.loading = true;
        loading.step(true);
        assert_eq!(loading.selected_index, 0);

        let mut failed = loaded(3);
        failed.error = Some("boom".to_string());
        failed.step(false);
        assert_eq!(failed.selected_index, 0);
    }

    #[test]
    fn test_window_follows_selection() {
        let mut state = loaded(30);
        assert_eq!(state.window_start(10), 0);
        state.selected_index = 9;
        assert_eq!(state.window_start(10), 0);
        state.selected_index = 15;
        assert_eq!(state.window_start(10), 6);
        assert_eq!(state.window_start(0), 0);
    }
}
