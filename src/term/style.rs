//! Style values and the box-model renderer.
//!
//! A [`Style`] is an immutable value: every setter consumes it and returns an
//! updated copy, so a style can be shared and reused across renders.
//!
//! ```
//! use kalshi_tui::term::{Align, BorderStyle, Style};
//!
//! let boxed = Style::new()
//!     .border(BorderStyle::Rounded)
//!     .border_foreground("#F01ADE")
//!     .padding((1, 4))
//!     .width(40)
//!     .align(Align::Center);
//!
//! let block = boxed.render("This text is centered\ninside a magenta box.");
//! assert_eq!(block.lines().count(), 6);
//! ```

use super::ansi::string_width;
use super::border::Border;
use super::color::{Color, IntoColor, RESET, sgr};
use super::layout::Align;

/// Four-sided spacing, resolved from CSS-style shorthand.
///
/// `1` sets every side, `(1, 2)` sets vertical/horizontal, `(1, 2, 3)` sets
/// top, horizontal, bottom and `(1, 2, 3, 4)` sets top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl Sides {
    pub const fn new(top: usize, right: usize, bottom: usize, left: usize) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(n: usize) -> Self {
        Self::new(n, n, n, n)
    }

    pub fn horizontal(&self) -> usize {
        self.left + self.right
    }
}

impl From<usize> for Sides {
    fn from(n: usize) -> Self {
        Self::all(n)
    }
}

impl From<(usize,)> for Sides {
    fn from((n,): (usize,)) -> Self {
        Self::all(n)
    }
}

impl From<(usize, usize)> for Sides {
    fn from((vertical, horizontal): (usize, usize)) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl From<(usize, usize, usize)> for Sides {
    fn from((top, horizontal, bottom): (usize, usize, usize)) -> Self {
        Self::new(top, horizontal, bottom, horizontal)
    }
}

impl From<(usize, usize, usize, usize)> for Sides {
    fn from((top, right, bottom, left): (usize, usize, usize, usize)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// Which edges of a border are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Edges {
    pub const ALL: Self = Self {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };
}

/// Text emphasis flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Emphasis {
    bold: bool,
    italic: bool,
    underline: bool,
    strikethrough: bool,
    reverse: bool,
    blink: bool,
    faint: bool,
}

/// A terminal style: colors, emphasis, sizing, spacing and border.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    foreground: Option<Color>,
    background: Option<Color>,
    emphasis: Emphasis,
    width: Option<usize>,
    align: Align,
    padding: Sides,
    margin: Sides,
    border: Option<Border>,
    edges: Edges,
    border_foreground: Option<Color>,
    border_background: Option<Color>,
}

impl Style {
    /// An empty style; rendering with it only normalizes line widths.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Colors ---

    /// Set the foreground color. Unresolvable specs leave the style unchanged.
    pub fn foreground(mut self, color: impl IntoColor) -> Self {
        if let Some(c) = color.into_color() {
            self.foreground = Some(c);
        }
        self
    }

    /// Set the background color. Unresolvable specs leave the style unchanged.
    pub fn background(mut self, color: impl IntoColor) -> Self {
        if let Some(c) = color.into_color() {
            self.background = Some(c);
        }
        self
    }

    // --- Emphasis ---

    pub fn bold(self) -> Self {
        self.set_bold(true)
    }

    pub fn set_bold(mut self, on: bool) -> Self {
        self.emphasis.bold = on;
        self
    }

    pub fn italic(self) -> Self {
        self.set_italic(true)
    }

    pub fn set_italic(mut self, on: bool) -> Self {
        self.emphasis.italic = on;
        self
    }

    pub fn underline(self) -> Self {
        self.set_underline(true)
    }

    pub fn set_underline(mut self, on: bool) -> Self {
        self.emphasis.underline = on;
        self
    }

    pub fn strikethrough(self) -> Self {
        self.set_strikethrough(true)
    }

    pub fn set_strikethrough(mut self, on: bool) -> Self {
        self.emphasis.strikethrough = on;
        self
    }

    pub fn reverse(self) -> Self {
        self.set_reverse(true)
    }

    pub fn set_reverse(mut self, on: bool) -> Self {
        self.emphasis.reverse = on;
        self
    }

    pub fn blink(self) -> Self {
        self.set_blink(true)
    }

    pub fn set_blink(mut self, on: bool) -> Self {
        self.emphasis.blink = on;
        self
    }

    pub fn faint(self) -> Self {
        self.set_faint(true)
    }

    pub fn set_faint(mut self, on: bool) -> Self {
        self.emphasis.faint = on;
        self
    }

    // --- Layout ---

    /// Minimum content width. Content wider than this is never truncated.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    // --- Spacing ---

    pub fn padding(mut self, sides: impl Into<Sides>) -> Self {
        self.padding = sides.into();
        self
    }

    pub fn padding_top(mut self, n: usize) -> Self {
        self.padding.top = n;
        self
    }

    pub fn padding_right(mut self, n: usize) -> Self {
        self.padding.right = n;
        self
    }

    pub fn padding_bottom(mut self, n: usize) -> Self {
        self.padding.bottom = n;
        self
    }

    pub fn padding_left(mut self, n: usize) -> Self {
        self.padding.left = n;
        self
    }

    pub fn margin(mut self, sides: impl Into<Sides>) -> Self {
        self.margin = sides.into();
        self
    }

    pub fn margin_top(mut self, n: usize) -> Self {
        self.margin.top = n;
        self
    }

    pub fn margin_right(mut self, n: usize) -> Self {
        self.margin.right = n;
        self
    }

    pub fn margin_bottom(mut self, n: usize) -> Self {
        self.margin.bottom = n;
        self
    }

    pub fn margin_left(mut self, n: usize) -> Self {
        self.margin.left = n;
        self
    }

    // --- Border ---

    /// Attach a border with all four edges visible.
    pub fn border(self, glyphs: impl Into<Border>) -> Self {
        self.border_sides(glyphs, true, true, true, true)
    }

    /// Attach a border and choose each edge explicitly.
    pub fn border_sides(
        mut self,
        glyphs: impl Into<Border>,
        top: bool,
        right: bool,
        bottom: bool,
        left: bool,
    ) -> Self {
        self.border = Some(glyphs.into());
        self.edges = Edges {
            top,
            right,
            bottom,
            left,
        };
        self
    }

    pub fn border_top(mut self, on: bool) -> Self {
        self.edges.top = on;
        self
    }

    pub fn border_right(mut self, on: bool) -> Self {
        self.edges.right = on;
        self
    }

    pub fn border_bottom(mut self, on: bool) -> Self {
        self.edges.bottom = on;
        self
    }

    pub fn border_left(mut self, on: bool) -> Self {
        self.edges.left = on;
        self
    }

    pub fn border_foreground(mut self, color: impl IntoColor) -> Self {
        if let Some(c) = color.into_color() {
            self.border_foreground = Some(c);
        }
        self
    }

    pub fn border_background(mut self, color: impl IntoColor) -> Self {
        if let Some(c) = color.into_color() {
            self.border_background = Some(c);
        }
        self
    }

    // --- Accessors ---

    pub fn get_padding(&self) -> Sides {
        self.padding
    }

    pub fn get_margin(&self) -> Sides {
        self.margin
    }

    // --- Rendering ---

    /// Render `text` into a rectangular block.
    pub fn render(&self, text: &str) -> String {
        let lines: Vec<&str> = text.split('\n').collect();

        let content_width = lines
            .iter()
            .map(|l| string_width(l))
            .max()
            .unwrap_or(0)
            .max(self.width.unwrap_or(0));
        let inner_width = content_width + self.padding.horizontal();

        let prefix = self.text_prefix();
        let styled = |line: String| {
            if prefix.is_empty() {
                line
            } else {
                format!("{prefix}{line}{RESET}")
            }
        };

        let blank = " ".repeat(inner_width);
        let pad_left = " ".repeat(self.padding.left);
        let pad_right = " ".repeat(self.padding.right);

        let mut body = Vec::with_capacity(lines.len() + self.padding.top + self.padding.bottom);
        body.extend((0..self.padding.top).map(|_| styled(blank.clone())));
        body.extend(lines.iter().map(|line| {
            styled(format!(
                "{pad_left}{}{pad_right}",
                self.align.apply(line, content_width)
            ))
        }));
        body.extend((0..self.padding.bottom).map(|_| styled(blank.clone())));

        let mut block_width = inner_width;
        if let Some(border) = &self.border {
            body = self.apply_border(body, border, inner_width);
            block_width += usize::from(self.edges.left) + usize::from(self.edges.right);
        }

        self.apply_margin(body, block_width).join("\n")
    }

    /// SGR prefix applied to every content line.
    fn text_prefix(&self) -> String {
        let mut prefix = String::new();
        if let Some(fg) = &self.foreground {
            prefix.push_str(&fg.fg_prefix());
        }
        if let Some(bg) = &self.background {
            prefix.push_str(&bg.bg_prefix());
        }
        let e = &self.emphasis;
        for (on, code) in [
            (e.bold, 1),
            (e.italic, 3),
            (e.underline, 4),
            (e.blink, 5),
            (e.reverse, 7),
            (e.faint, 2),
            (e.strikethrough, 9),
        ] {
            if on {
                prefix.push_str(&sgr(code));
            }
        }
        prefix
    }

    fn apply_border(&self, lines: Vec<String>, b: &Border, inner_width: usize) -> Vec<String> {
        let mut prefix = String::new();
        if let Some(fg) = &self.border_foreground {
            prefix.push_str(&fg.fg_prefix());
        }
        if let Some(bg) = &self.border_background {
            prefix.push_str(&bg.bg_prefix());
        }
        let suffix = if prefix.is_empty() { "" } else { RESET };
        let paint = |glyphs: String| format!("{prefix}{glyphs}{suffix}");

        let edge_line = |left: char, fill: char, right: char| {
            let mut s = String::new();
            if self.edges.left {
                s.push_str(&paint(left.to_string()));
            }
            s.push_str(&paint(fill.to_string().repeat(inner_width)));
            if self.edges.right {
                s.push_str(&paint(right.to_string()));
            }
            s
        };

        let left = if self.edges.left {
            paint(b.left.to_string())
        } else {
            String::new()
        };
        let right = if self.edges.right {
            paint(b.right.to_string())
        } else {
            String::new()
        };

        let mut out = Vec::with_capacity(lines.len() + 2);
        if self.edges.top {
            out.push(edge_line(b.top_left, b.top, b.top_right));
        }
        out.extend(lines.into_iter().map(|line| format!("{left}{line}{right}")));
        if self.edges.bottom {
            out.push(edge_line(b.bottom_left, b.bottom, b.bottom_right));
        }
        out
    }

    fn apply_margin(&self, lines: Vec<String>, block_width: usize) -> Vec<String> {
        let m = self.margin;
        if m == Sides::default() {
            return lines;
        }

        let blank = " ".repeat(block_width + m.horizontal());
        let left = " ".repeat(m.left);
        let right = " ".repeat(m.right);

        let mut out = Vec::with_capacity(lines.len() + m.top + m.bottom);
        out.extend((0..m.top).map(|_| blank.clone()));
        out.extend(lines.into_iter().map(|line| format!("{left}{line}{right}")));
        out.extend((0..m.bottom).map(|_| blank.clone()));
        out
    }
}
