//! Resolved theme colors.

use crate::config::ThemeConfig;
use crate::term::Color;

/// Theme colors parsed once from configuration.
///
/// A color string that does not parse resolves to `None`, which renders unstyled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub primary: Option<Color>,
    pub secondary: Option<Color>,
    pub accent: Option<Color>,
    pub warning: Option<Color>,
    pub error: Option<Color>,
    pub muted: Option<Color>,
    pub border: Option<Color>,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let parse = |name: &str, spec: &str| match spec.parse::<Color>() {
            Ok(color) => Some(color),
            Err(e) => {
                tracing::warn!(field = name, %e, "ignoring theme color");
                None
            }
        };
        Self {
            primary: parse("primary", &config.primary),
            secondary: parse("secondary", &config.secondary),
            accent: parse("accent", &config.accent),
            warning: parse("warning", &config.warning),
            error: parse("error", &config.error),
            muted: parse("muted", &config.muted),
            border: parse("border", &config.border),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::AnsiColor;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.primary, Some(Color::Ansi(AnsiColor::Cyan)));
        assert_eq!(theme.secondary, Some(Color::Ansi(AnsiColor::Magenta)));
        assert!(matches!(theme.accent, Some(Color::Rgb(..))));
    }

    #[test]
    fn test_bad_spec_is_unstyled() {
        let theme = Theme::from_config(&ThemeConfig {
            primary: "not-a-color".to_string(),
            border: "#F01ADE".to_string(),
            ..ThemeConfig::default()
        });
        assert_eq!(theme.primary, None);
        assert_eq!(theme.border, Some(Color::Rgb(0xF0, 0x1A, 0xDE)));
    }
}
