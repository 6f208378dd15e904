//! Application-level state.

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Whether to show the help overlay.
    pub show_help: bool,
    /// Footer message.
    pub status: Option<String>,
    /// Current error message.
    pub error: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self::default()
    }
}
