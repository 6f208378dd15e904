//! Composition of pre-rendered blocks.
//!
//! Blocks are plain strings; their width and height are recomputed from the
//! lines on every call.

use super::ansi::{center, pad_left, pad_right, string_width};

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl Align {
    /// Pad `line` to `width` according to this alignment.
    pub fn apply(self, line: &str, width: usize) -> String {
        match self {
            Self::Left => pad_right(line, width),
            Self::Center => center(line, width),
            Self::Right => pad_left(line, width),
        }
    }

    /// Leading offset of an item of size `size` inside `total` cells.
    fn offset(self, total: usize, size: usize) -> usize {
        let free = total.saturating_sub(size);
        match self {
            Self::Left => 0,
            Self::Center => free / 2,
            Self::Right => free,
        }
    }
}

impl VAlign {
    /// Leading offset of an item of height `size` inside `total` rows.
    fn offset(self, total: usize, size: usize) -> usize {
        let free = total.saturating_sub(size);
        match self {
            Self::Top => 0,
            Self::Center => free / 2,
            Self::Bottom => free,
        }
    }
}

/// Place blocks side by side, `gap` spaces apart.
///
/// Every row of the result has the same width; shorter blocks are filled with
/// blank space according to `align`.
pub fn join_horizontal<S: AsRef<str>>(align: VAlign, gap: usize, blocks: &[S]) -> String {
    if blocks.is_empty() {
        return String::new();
    }

    let split: Vec<Vec<&str>> = blocks
        .iter()
        .map(|b| b.as_ref().split('\n').collect())
        .collect();
    let widths: Vec<usize> = split
        .iter()
        .map(|lines| lines.iter().map(|l| string_width(l)).max().unwrap_or(0))
        .collect();
    let max_height = split.iter().map(Vec::len).max().unwrap_or(0);
    let gap = " ".repeat(gap);

    let mut rows = Vec::with_capacity(max_height);
    for row in 0..max_height {
        let parts: Vec<String> = split
            .iter()
            .zip(&widths)
            .map(|(lines, &width)| {
                let start = align.offset(max_height, lines.len());
                match row.checked_sub(start).and_then(|i| lines.get(i)) {
                    Some(line) => pad_right(line, width),
                    None => " ".repeat(width),
                }
            })
            .collect();
        rows.push(parts.join(&gap));
    }

    rows.join("\n")
}

/// Stack blocks vertically with `gap` empty lines between them.
///
/// All lines are padded to the widest line across every block.
pub fn join_vertical<S: AsRef<str>>(align: Align, gap: usize, blocks: &[S]) -> String {
    if blocks.is_empty() {
        return String::new();
    }

    let max_width = blocks
        .iter()
        .flat_map(|b| b.as_ref().split('\n'))
        .map(string_width)
        .max()
        .unwrap_or(0);

    let aligned: Vec<String> = blocks
        .iter()
        .map(|block| {
            block
                .as_ref()
                .split('\n')
                .map(|line| align.apply(line, max_width))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();

    let separator = "\n".repeat(gap + 1);
    aligned.join(&separator)
}

/// Position `content` inside a `width` x `height` canvas.
///
/// The result always has exactly `height` rows. Offsets are clamped at zero
/// and lines wider than the canvas are passed through uncut.
pub fn place(
    width: usize,
    height: usize,
    h_align: Align,
    v_align: VAlign,
    content: &str,
) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let start_y = v_align.offset(height, lines.len());
    let blank = " ".repeat(width);

    (0..height)
        .map(|y| match y.checked_sub(start_y).and_then(|i| lines.get(i)) {
            Some(line) => {
                let line_width = string_width(line);
                let start_x = h_align.offset(width, line_width);
                let right = width.saturating_sub(start_x + line_width);
                format!("{}{line}{}", " ".repeat(start_x), " ".repeat(right))
            }
            None => blank.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
