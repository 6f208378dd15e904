//! Event handler for turning terminal events into actions.

use super::input::{InputEvent, Key, KeyBinding};
use crate::config::KeyBindings;
use crate::error::{Error, Result};
use crate::state::{Action, Store};
use crate::term::ResizeHandle;
use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Parsed key bindings.
#[derive(Debug, Clone)]
struct Bindings {
    quit: KeyBinding,
    help: KeyBinding,
    up: KeyBinding,
    down: KeyBinding,
    select: KeyBinding,
    back: KeyBinding,
    refresh: KeyBinding,
}

impl Bindings {
    fn parse(config: &KeyBindings) -> Result<Self> {
        let parse = |name: &str, value: &str| {
            value
                .parse::<KeyBinding>()
                .map_err(|e| Error::config(format!("keybindings.{name}: {e}")))
        };
        Ok(Self {
            quit: parse("quit", &config.quit)?,
            help: parse("help", &config.help)?,
            up: parse("up", &config.up)?,
            down: parse("down", &config.down)?,
            select: parse("select", &config.select)?,
            back: parse("back", &config.back)?,
            refresh: parse("refresh", &config.refresh)?,
        })
    }
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy, Default)]
struct StoreSnapshot {
    show_help: bool,
}

/// Handles input events and produces actions.
pub struct EventHandler {
    bindings: Bindings,
    resize: Option<ResizeHandle>,
    store_snapshot: StoreSnapshot,
}

impl EventHandler {
    /// Create a handler from configured key bindings.
    pub fn new(keybindings: &KeyBindings) -> Result<Self> {
        Ok(Self {
            bindings: Bindings::parse(keybindings)?,
            resize: None,
            store_snapshot: StoreSnapshot::default(),
        })
    }

    /// Forward terminal resizes to a screen buffer.
    pub fn with_resize_handle(mut self, handle: ResizeHandle) -> Self {
        self.resize = Some(handle);
        self
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = StoreSnapshot {
            show_help: store.app.show_help,
        };
    }

    /// Map a terminal event to an action, if it means one.
    pub fn handle_event(&self, event: CrosstermEvent) -> Option<Action> {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(key),
            CrosstermEvent::Resize(width, height) => {
                if let Some(handle) = &self.resize {
                    handle.notify(width, height);
                }
                None
            }
            _ => None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let input = InputEvent::from(key);
        let b = &self.bindings;

        // Ctrl+C always quits.
        if input.matches(&b.quit) || input.matches(&KeyBinding::ctrl('c')) {
            return Some(Action::Quit);
        }
        if input.matches(&b.help) {
            return Some(Action::ToggleHelp);
        }

        // The help overlay swallows everything else.
        if self.store_snapshot.show_help {
            return input.matches(&b.back).then_some(Action::CloseHelp);
        }

        if input.matches(&b.up) || input.matches(&KeyBinding::new(Key::Up)) {
            return Some(Action::ScrollUp);
        }
        if input.matches(&b.down) || input.matches(&KeyBinding::new(Key::Down)) {
            return Some(Action::ScrollDown);
        }
        if input.matches(&b.select) {
            return Some(Action::SelectSeries);
        }
        if input.matches(&b.refresh) {
            return Some(Action::RefreshAll);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use tokio::sync::mpsc;

    fn create_test_handler() -> EventHandler {
        EventHandler::new(&KeyBindings::default()).unwrap()
    }

    fn press(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_default_bindings() {
        let handler = create_test_handler();
        assert_eq!(handler.handle_event(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(handler.handle_event(press(KeyCode::Up)), Some(Action::ScrollUp));
        assert_eq!(handler.handle_event(press(KeyCode::Char('k'))), Some(Action::ScrollUp));
        assert_eq!(handler.handle_event(press(KeyCode::Down)), Some(Action::ScrollDown));
        assert_eq!(handler.handle_event(press(KeyCode::Char('j'))), Some(Action::ScrollDown));
        assert_eq!(handler.handle_event(press(KeyCode::Enter)), Some(Action::SelectSeries));
        assert_eq!(handler.handle_event(press(KeyCode::Char('r'))), Some(Action::RefreshAll));
        assert_eq!(handler.handle_event(press(KeyCode::Char('?'))), Some(Action::ToggleHelp));
        assert_eq!(handler.handle_event(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let handler = create_test_handler();
        let event = CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handler.handle_event(event), Some(Action::Quit));
    }

    #[test]
    fn test_release_events_ignored() {
        let handler = create_test_handler();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        assert_eq!(handler.handle_event(CrosstermEvent::Key(key)), None);
    }

    #[test]
    fn test_help_overlay_captures_navigation() {
        let mut handler = create_test_handler();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::ToggleHelp);
        handler.update_store_snapshot(&store);

        assert_eq!(handler.handle_event(press(KeyCode::Down)), None);
        assert_eq!(handler.handle_event(press(KeyCode::Esc)), Some(Action::CloseHelp));
        assert_eq!(handler.handle_event(press(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_resize_is_forwarded() {
        let mut screen = crate::term::ScreenBuffer::new(Vec::new(), 80, 24);
        let handler = create_test_handler().with_resize_handle(screen.resize_handle());
        assert_eq!(handler.handle_event(CrosstermEvent::Resize(120, 40)), None);

        screen.clear();
        assert_eq!((screen.width(), screen.height()), (120, 40));
    }

    #[test]
    fn test_custom_bindings() {
        let bindings = KeyBindings {
            quit: "Ctrl+x".to_string(),
            ..KeyBindings::default()
        };
        let handler = EventHandler::new(&bindings).unwrap();
        let event = CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(handler.handle_event(event), Some(Action::Quit));
        assert_eq!(handler.handle_event(press(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_invalid_binding_is_config_error() {
        let bindings = KeyBindings {
            up: "Hyper+k".to_string(),
            ..KeyBindings::default()
        };
        let err = EventHandler::new(&bindings).err().unwrap();
        assert!(err.to_string().contains("keybindings.up"));
    }
}
