//! Configuration settings for kalshi-tui.

use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Production REST root.
pub const PROD_BASE_URL: &str = "https://api.elections.kalshi.com/trade-api/v2";
/// Demo environment REST root.
pub const DEMO_BASE_URL: &str = "https://demo.kalshi.com/trade-api/v2";

/// Prefix for layered environment overrides, e.g. `KALSHI_TUI__API__DEMO=true`.
const ENV_PREFIX: &str = "KALSHI_TUI";
const LEGACY_KEY_ID_VAR: &str = "KALSHI_API_KEY";
const LEGACY_PRIVATE_KEY_VAR: &str = "KALSHI_PRIVATE_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration: defaults, then the TOML file, then `KALSHI_TUI__*`
    /// variables, then the legacy credential variables.
    ///
    /// The default file may be absent; an explicit `path` must exist.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let required = path.is_some();
        let config_path = path.unwrap_or_else(super::config_file);
        let mut config = Self::layered(&config_path, required, environment())?;
        config.apply_legacy_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn layered(path: &Path, required: bool, env: Environment) -> crate::Result<Self> {
        tracing::debug!(path = %path.display(), required, "loading configuration");
        config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(|e| crate::Error::config(e.to_string()))
    }

    /// Fill credentials from `KALSHI_API_KEY` / `KALSHI_PRIVATE_KEY` when the
    /// layered sources left them empty.
    fn apply_legacy_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.api.key_id.is_none() {
            self.api.key_id = lookup(LEGACY_KEY_ID_VAR).filter(|v| !v.trim().is_empty());
        }
        if self.api.private_key.is_none() && self.api.private_key_path.is_none() {
            self.api.private_key =
                lookup(LEGACY_PRIVATE_KEY_VAR).filter(|v| !v.trim().is_empty());
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(super::config_file);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Explicit REST root; overrides `demo`.
    pub base_url: Option<String>,
    /// Use the demo environment.
    pub demo: bool,
    /// API key id.
    pub key_id: Option<String>,
    /// PEM-encoded RSA private key.
    pub private_key: Option<String>,
    /// Path to a PEM file, used when `private_key` is unset.
    pub private_key_path: Option<PathBuf>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Requests admitted per window.
    pub rate_limit: usize,
    /// Rate limit window in milliseconds.
    pub rate_window_ms: u64,
}

impl ApiConfig {
    /// The REST root these settings point at.
    pub fn resolved_base_url(&self) -> &str {
        match &self.base_url {
            Some(url) if !url.trim().is_empty() => url.trim_end_matches('/'),
            _ if self.demo => DEMO_BASE_URL,
            _ => PROD_BASE_URL,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            demo: false,
            key_id: None,
            private_key: None,
            private_key_path: None,
            timeout_secs: 30,
            rate_limit: 10,
            rate_window_ms: 1000,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Series category to browse.
    pub series_category: String,
    /// Series tag filter.
    pub series_tags: String,
    /// Rows of the series list shown at once.
    pub max_series_rows: usize,
    /// Events whose markets are fetched after a selection.
    pub max_events: usize,
    /// Events rendered in the detail panel.
    pub events_shown: usize,
    /// Markets rendered per event.
    pub markets_per_event: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            series_category: "Climate and Weather".to_string(),
            series_tags: "Daily temperature".to_string(),
            max_series_rows: 20,
            max_events: 5,
            events_shown: 3,
            markets_per_event: 3,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/confirm.
    pub select: String,
    /// Close overlays.
    pub back: String,
    /// Refresh data.
    pub refresh: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
        }
    }
}

/// Theme configuration. Values are color specs: names (`cyan`, `mint`) or hex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Series panel border.
    pub primary: String,
    /// Events panel border.
    pub secondary: String,
    /// Headings and highlights.
    pub accent: String,
    /// Footer and loading text.
    pub warning: String,
    /// Error text.
    pub error: String,
    /// De-emphasized text.
    pub muted: String,
    /// Table borders.
    pub border: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "cyan".to_string(),
            secondary: "magenta".to_string(),
            accent: "mint".to_string(),
            warning: "yellow".to_string(),
            error: "red".to_string(),
            muted: "gray".to_string(),
            border: "gray".to_string(),
        }
    }
}
