//! Border glyph sets.

use std::str::FromStr;

/// The glyphs used to draw a box or grid. Every glyph is one cell wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub top: char,
    pub bottom: char,
    pub left: char,
    pub right: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub middle_left: char,
    pub middle_right: char,
    pub middle: char,
    pub middle_top: char,
    pub middle_bottom: char,
}

pub const NORMAL_BORDER: Border = Border {
    top: '─',
    bottom: '─',
    left: '│',
    right: '│',
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    middle_left: '├',
    middle_right: '┤',
    middle: '┼',
    middle_top: '┬',
    middle_bottom: '┴',
};

pub const ROUNDED_BORDER: Border = Border {
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    ..NORMAL_BORDER
};

pub const THICK_BORDER: Border = Border {
    top: '━',
    bottom: '━',
    left: '┃',
    right: '┃',
    top_left: '┏',
    top_right: '┓',
    bottom_left: '┗',
    bottom_right: '┛',
    middle_left: '┣',
    middle_right: '┫',
    middle: '╋',
    middle_top: '┳',
    middle_bottom: '┻',
};

pub const DOUBLE_BORDER: Border = Border {
    top: '═',
    bottom: '═',
    left: '║',
    right: '║',
    top_left: '╔',
    top_right: '╗',
    bottom_left: '╚',
    bottom_right: '╝',
    middle_left: '╠',
    middle_right: '╣',
    middle: '╬',
    middle_top: '╦',
    middle_bottom: '╩',
};

pub const HIDDEN_BORDER: Border = Border {
    top: ' ',
    bottom: ' ',
    left: ' ',
    right: ' ',
    top_left: ' ',
    top_right: ' ',
    bottom_left: ' ',
    bottom_right: ' ',
    middle_left: ' ',
    middle_right: ' ',
    middle: ' ',
    middle_top: ' ',
    middle_bottom: ' ',
};

/// Built-in border variants, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Normal,
    Rounded,
    Thick,
    Double,
    Hidden,
}

impl BorderStyle {
    /// The glyph set for this variant.
    pub fn glyphs(self) -> Border {
        match self {
            Self::Normal => NORMAL_BORDER,
            Self::Rounded => ROUNDED_BORDER,
            Self::Thick => THICK_BORDER,
            Self::Double => DOUBLE_BORDER,
            Self::Hidden => HIDDEN_BORDER,
        }
    }

    /// Resolve a name, falling back to `Normal` for anything unknown.
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for BorderStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "rounded" => Ok(Self::Rounded),
            "thick" => Ok(Self::Thick),
            "double" => Ok(Self::Double),
            "hidden" => Ok(Self::Hidden),
            _ => Err(()),
        }
    }
}

impl From<BorderStyle> for Border {
    fn from(style: BorderStyle) -> Self {
        style.glyphs()
    }
}

impl Default for Border {
    fn default() -> Self {
        NORMAL_BORDER
    }
}
