//! Screen geometry for the browser.

/// Fixed rows and panel widths, plus the decision whether the two panels fit
/// side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Terminal size.
    pub width: usize,
    pub height: usize,
    /// Title row.
    pub title_row: u16,
    /// Key hint row.
    pub hint_row: u16,
    /// First row of the panels.
    pub body_row: u16,
    /// Left margin of every row.
    pub indent: usize,
    /// Content width of the series panel.
    pub series_width: usize,
    /// Content width of the events panel.
    pub events_width: usize,
    /// Content width of the footer.
    pub footer_width: usize,
    /// Columns between the panels.
    pub gap: usize,
    /// Panels are stacked vertically on narrow terminals.
    pub stacked: bool,
}

/// Columns a bordered panel adds around its content (border + padding).
pub const PANEL_CHROME: usize = 4;

impl Layout {
    /// Create a layout for a terminal of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        let mut layout = Self {
            width: usize::from(width),
            height: usize::from(height),
            title_row: 1,
            hint_row: 2,
            body_row: 4,
            indent: 2,
            series_width: 70,
            events_width: 90,
            footer_width: 70,
            gap: 2,
            stacked: false,
        };
        layout.stacked = layout.width < layout.side_by_side_width();
        layout
    }

    /// Total columns needed to show both panels next to each other.
    pub fn side_by_side_width(&self) -> usize {
        self.indent + self.series_width + PANEL_CHROME + self.gap + self.events_width + PANEL_CHROME
    }

    /// Rows from the body start to the bottom of the screen.
    pub fn body_height(&self) -> usize {
        self.height.saturating_sub(usize::from(self.body_row))
    }
}
