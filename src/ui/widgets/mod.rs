//! TUI widgets. Each renders a block string from store state.

mod event_panel;
mod help;
mod series_list;
mod status_bar;

pub use event_panel::{EventPanel, market_headers, market_row};
pub use help::HelpPanel;
pub use series_list::SeriesList;
pub use status_bar::StatusBar;
