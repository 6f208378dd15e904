//! Visible-width measurement for strings carrying SGR escape sequences.
//!
//! Width is the `char` count after stripping `ESC [ ... m` sequences. Wide
//! glyphs (CJK, emoji) and combining marks are each counted as one cell.

use regex::Regex;
use std::sync::LazyLock;

static SGR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid SGR regex"));

/// Remove all SGR escape sequences from a string.
pub fn strip_ansi(s: &str) -> String {
    SGR_REGEX.replace_all(s, "").into_owned()
}

/// Number of visible cells a string occupies.
pub fn string_width(s: &str) -> usize {
    if !s.contains('\x1b') {
        return s.chars().count();
    }
    strip_ansi(s).chars().count()
}

/// Widest visible line of a multi-line block.
pub fn block_width(block: &str) -> usize {
    block.split('\n').map(string_width).max().unwrap_or(0)
}

/// Pad with trailing spaces up to `width`. Never truncates.
pub fn pad_right(s: &str, width: usize) -> String {
    let len = string_width(s);
    if len >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - len))
}

/// Pad with leading spaces up to `width`. Never truncates.
pub fn pad_left(s: &str, width: usize) -> String {
    let len = string_width(s);
    if len >= width {
        return s.to_string();
    }
    format!("{}{s}", " ".repeat(width - len))
}

/// Center within `width`; an odd remainder puts the extra space on the right.
pub fn center(s: &str, width: usize) -> String {
    let len = string_width(s);
    if len >= width {
        return s.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{s}{}", " ".repeat(left), " ".repeat(right))
}

/// First `max` characters of a plain (unstyled) string.
pub fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
