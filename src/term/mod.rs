//! Terminal rendering toolkit.
//!
//! Data flows one way: raw strings are styled into blocks ([`Style`]),
//! composed into layouts ([`join_horizontal`], [`join_vertical`], [`place`]),
//! written into a [`ScreenBuffer`] and diffed onto the terminal.
//!
//! - **ansi**: visible-width measurement
//! - **color**: color specs and SGR prefixes
//! - **border**: glyph sets
//! - **style**: the box model
//! - **layout**: block composition
//! - **table**: bordered grids
//! - **screen**: the double-buffered writer
//! - **json**: highlighted JSON

pub mod ansi;
pub mod border;
pub mod color;
pub mod json;
pub mod layout;
pub mod screen;
pub mod style;
pub mod table;

pub use ansi::{block_width, center, pad_left, pad_right, string_width, strip_ansi, truncate};
pub use border::{Border, BorderStyle};
pub use color::{AnsiColor, Color, IntoColor, color, hsl, rainbow, rgb};
pub use json::highlight_json;
pub use layout::{Align, VAlign, join_horizontal, join_vertical, place};
pub use screen::{ResizeHandle, ScreenBuffer};
pub use style::{Sides, Style};
pub use table::{TableOptions, render_table, write_table};
