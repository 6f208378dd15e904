//! Color specifications and SGR prefixes.

use std::str::FromStr;
use thiserror::Error;

/// SGR reset sequence.
pub const RESET: &str = "\x1b[0m";

/// Build a single SGR sequence from a numeric code.
pub fn sgr(code: u8) -> String {
    format!("\x1b[{code}m")
}

/// The standard 8-color set plus bright black (gray).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl AnsiColor {
    /// Foreground SGR code.
    pub fn fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::Gray => 90,
        }
    }

    /// Background SGR code.
    pub fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            "gray" | "grey" => Self::Gray,
            _ => return None,
        })
    }
}

/// Extended palette, keyed by normalized (lowercase, no separators) name.
const PALETTE: &[(&str, (u8, u8, u8))] = &[
    ("coral", (255, 127, 80)),
    ("peach", (255, 218, 185)),
    ("lavender", (230, 230, 250)),
    ("mint", (152, 255, 152)),
    ("sky", (135, 206, 235)),
    ("rose", (255, 182, 193)),
    ("gold", (255, 215, 0)),
    ("violet", (238, 130, 238)),
    ("aqua", (127, 255, 212)),
    ("salmon", (250, 128, 114)),
    ("lime", (50, 205, 50)),
    ("indigo", (75, 0, 130)),
    ("teal", (0, 128, 128)),
    ("amber", (255, 191, 0)),
    ("crimson", (220, 20, 60)),
    ("emerald", (80, 200, 120)),
    ("sapphire", (15, 82, 186)),
    ("mutedred", (180, 100, 100)),
    ("mutedgreen", (120, 160, 120)),
    ("mutedblue", (100, 120, 180)),
    ("mutedyellow", (200, 180, 100)),
    ("mutedpurple", (160, 120, 160)),
    ("mutedorange", (200, 140, 100)),
    ("lightgray", (192, 192, 192)),
    ("darkgray", (64, 64, 64)),
];

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the standard colors.
    Ansi(AnsiColor),
    /// 24-bit true color.
    Rgb(u8, u8, u8),
    /// A raw SGR code, used as-is for foreground.
    Code(u8),
}

impl Color {
    /// Parse `#RRGGBB` or `#RGB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return None,
        };
        let value = u32::from_str_radix(&expanded, 16).ok()?;
        Some(Self::Rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        ))
    }

    /// Look up a standard or palette color by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        if let Some(ansi) = AnsiColor::from_name(&key) {
            return Some(Self::Ansi(ansi));
        }

        PALETTE
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, (r, g, b))| Self::Rgb(*r, *g, *b))
    }

    /// SGR prefix selecting this color as the foreground.
    pub fn fg_prefix(&self) -> String {
        match self {
            Self::Ansi(c) => sgr(c.fg_code()),
            Self::Rgb(r, g, b) => format!("\x1b[38;2;{r};{g};{b}m"),
            Self::Code(code) => sgr(*code),
        }
    }

    /// SGR prefix selecting this color as the background.
    pub fn bg_prefix(&self) -> String {
        match self {
            Self::Ansi(c) => sgr(c.bg_code()),
            Self::Rgb(r, g, b) => format!("\x1b[48;2;{r};{g};{b}m"),
            Self::Code(code @ (30..=37 | 90..=97)) => sgr(code + 10),
            Self::Code(code) => sgr(*code),
        }
    }
}

/// Returned when a color specification cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color: {0}")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_name(s)
        };
        parsed.ok_or_else(|| UnknownColor(s.to_string()))
    }
}

impl From<AnsiColor> for Color {
    fn from(c: AnsiColor) -> Self {
        Self::Ansi(c)
    }
}

/// Anything that may describe a color. Unresolvable specs yield `None`.
pub trait IntoColor {
    fn into_color(self) -> Option<Color>;
}

impl IntoColor for Color {
    fn into_color(self) -> Option<Color> {
        Some(self)
    }
}

impl IntoColor for AnsiColor {
    fn into_color(self) -> Option<Color> {
        Some(Color::Ansi(self))
    }
}

impl IntoColor for u8 {
    fn into_color(self) -> Option<Color> {
        Some(Color::Code(self))
    }
}

impl IntoColor for &str {
    fn into_color(self) -> Option<Color> {
        self.parse().ok()
    }
}

impl IntoColor for &String {
    fn into_color(self) -> Option<Color> {
        self.parse().ok()
    }
}

impl IntoColor for String {
    fn into_color(self) -> Option<Color> {
        self.parse().ok()
    }
}

impl IntoColor for Option<Color> {
    fn into_color(self) -> Option<Color> {
        self
    }
}

/// Wrap `text` in a foreground color. Unknown specs return the text unstyled.
pub fn color(text: &str, spec: impl IntoColor) -> String {
    match spec.into_color() {
        Some(c) => format!("{}{text}{RESET}", c.fg_prefix()),
        None => text.to_string(),
    }
}

/// True-color foreground prefix.
pub fn rgb(r: u8, g: u8, b: u8) -> String {
    Color::Rgb(r, g, b).fg_prefix()
}

/// Foreground prefix from hue/saturation/lightness, each in `0.0..=1.0`.
pub fn hsl(h: f64, s: f64, l: f64) -> String {
    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };
    rgb(to_channel(r), to_channel(g), to_channel(b))
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Color each character along a sine-wave gradient.
pub fn rainbow(text: &str, frequency: f64) -> String {
    let mut out = String::with_capacity(text.len() * 20);
    for (i, ch) in text.chars().enumerate() {
        let x = frequency * i as f64;
        let wave = |phase: f64| ((x + phase).sin() * 55.0 + 145.0).floor() as u8;
        out.push_str(&rgb(wave(0.0), wave(2.0), wave(4.0)));
        out.push(ch);
    }
    out.push_str(RESET);
    out
}
