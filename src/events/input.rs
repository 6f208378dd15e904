//! Input event types and key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Other,
        }
    }
}

/// Key modifiers. Shift is not tracked: it is already folded into the
/// character for printable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    /// Create a new input event.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A plain key press.
    pub fn key(key: Key) -> Self {
        Self::new(key, Modifiers::default())
    }

    /// Check if this matches a key binding.
    pub fn matches(&self, binding: &KeyBinding) -> bool {
        if self.modifiers != binding.modifiers {
            return false;
        }
        match (self.key, binding.key) {
            // Bindings match letters case-insensitively.
            (Key::Char(a), Key::Char(b)) => a == b || a.to_ascii_lowercase() == b,
            (a, b) => a == b,
        }
    }
}

/// A parsed binding such as `q`, `Enter` or `Ctrl+c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyBinding {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: false,
                alt: false,
            },
        }
    }

    pub const fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            modifiers: Modifiers {
                ctrl: true,
                alt: false,
            },
        }
    }
}

impl FromStr for KeyBinding {
    type Err = String;

    fn from_str(binding: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::default();
        let mut key = None;

        // A lone "+" is the plus key, not a separator.
        let parts: Vec<&str> = if binding == "+" {
            vec!["+"]
        } else {
            binding.split('+').collect()
        };

        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "enter" | "return" => key = Some(Key::Enter),
                "esc" | "escape" => key = Some(Key::Escape),
                "backspace" => key = Some(Key::Backspace),
                "tab" => key = Some(Key::Tab),
                "up" => key = Some(Key::Up),
                "down" => key = Some(Key::Down),
                "left" => key = Some(Key::Left),
                "right" => key = Some(Key::Right),
                "home" => key = Some(Key::Home),
                "end" => key = Some(Key::End),
                "pageup" => key = Some(Key::PageUp),
                "pagedown" => key = Some(Key::PageDown),
                s if s.len() > 1 && s.starts_with('f') && s[1..].parse::<u8>().is_ok() => {
                    key = s[1..].parse().ok().map(Key::F);
                }
                s => {
                    let mut chars = s.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => key = Some(Key::Char(c)),
                        _ => return Err(format!("unknown key '{part}' in binding '{binding}'")),
                    }
                }
            }
        }

        key.map(|key| Self { key, modifiers })
            .ok_or_else(|| format!("binding '{binding}' names no key"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> KeyBinding {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_bindings() {
        assert_eq!(parse("q"), KeyBinding::new(Key::Char('q')));
        assert_eq!(parse("Enter"), KeyBinding::new(Key::Enter));
        assert_eq!(parse("Ctrl+c"), KeyBinding::ctrl('c'));
        assert_eq!(parse("?"), KeyBinding::new(Key::Char('?')));
        assert_eq!(parse("+"), KeyBinding::new(Key::Char('+')));
        assert_eq!(parse("F5"), KeyBinding::new(Key::F(5)));
        assert!("Ctrl+".parse::<KeyBinding>().is_err());
        assert!("Hyper+x".parse::<KeyBinding>().is_err());
    }

    #[test]
    fn test_matches() {
        let q = parse("q");
        assert!(InputEvent::key(Key::Char('q')).matches(&q));
        assert!(InputEvent::key(Key::Char('Q')).matches(&q));
        assert!(!InputEvent::key(Key::Char('w')).matches(&q));

        let ctrl_c = InputEvent::from(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(ctrl_c.matches(&KeyBinding::ctrl('c')));
        assert!(!ctrl_c.matches(&parse("c")));
    }

    #[test]
    fn test_shift_is_ignored_for_printables() {
        let question = InputEvent::from(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT));
        assert!(question.matches(&parse("?")));
    }
}
