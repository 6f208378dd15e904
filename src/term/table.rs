//! Bordered grid rendering for header/row data.

use std::io::{self, Write};

use super::ansi::string_width;
use super::border::{Border, BorderStyle};
use super::color::{Color, IntoColor, RESET};

/// Horizontal padding added to every column.
const CELL_PADDING: usize = 2;

/// Options for [`render_table`] and [`write_table`].
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Glyph set for the grid.
    pub border: Border,
    /// Color applied to every border glyph run.
    pub border_color: Option<Color>,
    /// Color applied to the content of every second data row.
    pub alternate_row_color: Option<Color>,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn border(mut self, border: impl Into<Border>) -> Self {
        self.border = border.into();
        self
    }

    /// Select a built-in border by name; unknown names fall back to normal.
    pub fn border_named(self, name: &str) -> Self {
        self.border(BorderStyle::resolve(name))
    }

    pub fn border_color(mut self, color: impl IntoColor) -> Self {
        self.border_color = color.into_color();
        self
    }

    pub fn alternate_row_color(mut self, color: impl IntoColor) -> Self {
        self.alternate_row_color = color.into_color();
        self
    }
}

/// Render a table to a string. Returns an empty string when there is nothing
/// to draw.
pub fn render_table<H, C>(headers: &[H], rows: &[Vec<C>], options: &TableOptions) -> String
where
    H: AsRef<str>,
    C: AsRef<str>,
{
    table_lines(headers, rows, options).join("\n")
}

/// Write a table line by line to `out`. Writes nothing when there is nothing
/// to draw.
pub fn write_table<W, H, C>(
    out: &mut W,
    headers: &[H],
    rows: &[Vec<C>],
    options: &TableOptions,
) -> io::Result<()>
where
    W: Write,
    H: AsRef<str>,
    C: AsRef<str>,
{
    for line in table_lines(headers, rows, options) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Column widths: widest visible cell plus padding.
pub fn column_widths<H, C>(headers: &[H], rows: &[Vec<C>]) -> Vec<usize>
where
    H: AsRef<str>,
    C: AsRef<str>,
{
    let num_cols = rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(headers.len());

    (0..num_cols)
        .map(|i| {
            let header = headers.get(i).map_or(0, |h| string_width(h.as_ref()));
            let body = rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| string_width(cell.as_ref()))
                .max()
                .unwrap_or(0);
            header.max(body) + CELL_PADDING
        })
        .collect()
}

fn table_lines<H, C>(headers: &[H], rows: &[Vec<C>], options: &TableOptions) -> Vec<String>
where
    H: AsRef<str>,
    C: AsRef<str>,
{
    if headers.is_empty() && rows.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(headers, rows);
    let b = &options.border;
    let prefix = options.border_color.map(|c| c.fg_prefix());
    let paint = |s: String| match &prefix {
        Some(p) => format!("{p}{s}{RESET}"),
        None => s,
    };

    let rule = |left: char, fill: char, right: char, join: char| {
        let mut s = paint(left.to_string());
        for (i, w) in widths.iter().enumerate() {
            s.push_str(&paint(fill.to_string().repeat(*w)));
            if i + 1 < widths.len() {
                s.push_str(&paint(join.to_string()));
            }
        }
        s.push_str(&paint(right.to_string()));
        s
    };

    let v_left = paint(b.left.to_string());
    let v_mid = paint(b.left.to_string());
    let v_right = paint(b.right.to_string());

    let row_line = |cells: Vec<String>| {
        let mut s = v_left.clone();
        let last = cells.len().saturating_sub(1);
        for (i, cell) in cells.into_iter().enumerate() {
            s.push_str(&cell);
            s.push_str(if i < last { &v_mid } else { &v_right });
        }
        s
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(rule(b.top_left, b.top, b.top_right, b.middle_top));

    if !headers.is_empty() {
        let cells = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let content = headers.get(i).map_or("", |h| h.as_ref());
                let pad = w.saturating_sub(string_width(content));
                let left = pad / 2;
                format!("{}{content}{}", " ".repeat(left), " ".repeat(pad - left))
            })
            .collect();
        lines.push(row_line(cells));
        lines.push(rule(b.middle_left, b.top, b.middle_right, b.middle));
    }

    for (r, row) in rows.iter().enumerate() {
        let highlight = options
            .alternate_row_color
            .filter(|_| r % 2 == 1)
            .map(|c| c.fg_prefix());
        let cells = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let content = row.get(i).map_or("", |c| c.as_ref());
                let right = w.saturating_sub(string_width(content) + 1);
                let content = match &highlight {
                    Some(p) if !content.is_empty() => format!("{p}{content}{RESET}"),
                    _ => content.to_string(),
                };
                format!(" {content}{}", " ".repeat(right))
            })
            .collect();
        lines.push(row_line(cells));
    }

    lines.push(rule(b.bottom_left, b.bottom, b.bottom_right, b.middle_bottom));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::ansi::strip_ansi;
    use pretty_assertions::assert_eq;

    fn sample() -> (Vec<&'static str>, Vec<Vec<&'static str>>) {
        (
            vec!["Ticker", "Price"],
            vec![vec!["FOO", "10"], vec!["BAR", "200"]],
        )
    }

    #[test]
    fn test_column_widths() {
        let (headers, rows) = sample();
        assert_eq!(column_widths(&headers, &rows), vec![8, 7]);
    }

    #[test]
    fn test_render_grid() {
        let (headers, rows) = sample();
        let out = render_table(&headers, &rows, &TableOptions::new());
        let expected = [
            "┌────────┬───────┐",
            "│ Ticker │ Price │",
            "├────────┼───────┤",
            "│ FOO    │ 10    │",
            "│ BAR    │ 200   │",
            "└────────┴───────┘",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_no_headers_skips_separator() {
        let headers: Vec<&str> = Vec::new();
        let rows = vec![vec!["a"], vec!["b", "cc"]];
        let out = render_table(&headers, &rows, &TableOptions::new().border_named("rounded"));
        let expected = ["╭───┬────╮", "│ a │    │", "│ b │ cc │", "╰───┴────╯"];
        let expected = expected.join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_table_emits_nothing() {
        let headers: Vec<&str> = Vec::new();
        let rows: Vec<Vec<&str>> = Vec::new();
        assert_eq!(render_table(&headers, &rows, &TableOptions::new()), "");

        let mut buf = Vec::new();
        write_table(&mut buf, &headers, &rows, &TableOptions::new()).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_table_matches_render() {
        let (headers, rows) = sample();
        let opts = TableOptions::new().border_color("#30BFEB");
        let mut buf = Vec::new();
        write_table(&mut buf, &headers, &rows, &opts).unwrap();
        let written = String::from_utf8(buf).unwrap();
        assert_eq!(written, format!("{}\n", render_table(&headers, &rows, &opts)));
    }

    #[test]
    fn test_colored_cells_and_borders_keep_alignment() {
        let headers = vec!["\x1b[36mTicker\x1b[0m".to_string(), "Price".to_string()];
        let rows = vec![vec!["FOO".to_string(), "\x1b[32m10\x1b[0m".to_string()]];
        let opts = TableOptions::new()
            .border(BorderStyle::Double)
            .border_color("gray")
            .alternate_row_color("mint");
        let out = render_table(&headers, &rows, &opts);
        let widths: Vec<usize> = out.split('\n').map(string_width).collect();
        assert!(widths.iter().all(|w| *w == 8 + 7 + 3));
        assert!(strip_ansi(&out).starts_with("╔════════╦═══════╗"));
    }

    #[test]
    fn test_alternate_rows_are_colored() {
        let headers = vec!["A"];
        let rows = vec![vec!["x"], vec!["y"], vec!["z"]];
        let opts = TableOptions::new().alternate_row_color("red");
        let lines: Vec<String> = render_table(&headers, &rows, &opts)
            .split('\n')
            .map(str::to_string)
            .collect();
        assert_eq!(lines[3], "│ x │");
        assert_eq!(lines[4], "│ \x1b[31my\x1b[0m │");
        assert_eq!(lines[5], "│ z │");
    }
}
