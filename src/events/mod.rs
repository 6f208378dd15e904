//! Event handling for kalshi-tui.
//!
//! Terminal events arrive on crossterm's async [`EventStream`]; the
//! [`EventHandler`] maps them to store actions through the configured key
//! bindings and forwards resizes to the screen buffer.

mod handler;
mod input;

pub use crossterm::event::EventStream;
pub use handler::EventHandler;
pub use input::{InputEvent, Key, KeyBinding, Modifiers};
