//! Help overlay.

use crate::config::KeyBindings;
use crate::term::{Align, BorderStyle, Style, color, pad_right};
use crate::ui::Theme;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help box; the caller centers it.
    pub fn render(theme: &Theme, keys: &KeyBindings) -> String {
        let entries = [
            (format!("{}/Up", keys.up), "Move up"),
            (format!("{}/Down", keys.down), "Move down"),
            (keys.select.clone(), "Load events for the selected series"),
            (keys.refresh.clone(), "Reload the series list"),
            (keys.help.clone(), "Toggle this help"),
            (keys.back.clone(), "Close this help"),
            (format!("{}/Ctrl+c", keys.quit), "Quit"),
        ];

        let mut lines = vec![
            Style::new()
                .bold()
                .foreground(theme.warning)
                .render("Keys"),
            String::new(),
        ];
        lines.extend(entries.iter().map(|(key, what)| {
            format!("{}{what}", color(&pad_right(key, 12), theme.primary))
        }));

        Style::new()
            .border(BorderStyle::Double)
            .border_foreground(theme.accent)
            .padding((1, 3))
            .align(Align::Left)
            .render(&lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::strip_ansi;

    #[test]
    fn test_lists_configured_keys() {
        let keys = KeyBindings {
            quit: "x".to_string(),
            ..KeyBindings::default()
        };
        let plain = strip_ansi(&HelpPanel::render(&Theme::default(), &keys));
        assert!(plain.contains("x/Ctrl+c"));
        assert!(plain.contains("k/Up"));
        assert!(plain.contains("Enter"));
        assert!(plain.starts_with('╔'));
    }
}
