//! Frame theme registry.
//!
//! Themes are a closed set of static records. Lookups never allocate and the
//! same `&'static ThemeSpec` is shared by every composition.

use std::fmt;
use std::str::FromStr;

use photobox_common::error::PhotoboxError;
use serde::{Deserialize, Serialize};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Self(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.0, self.1, self.2, 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Where a cell border stroke sits relative to the cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderPlacement {
    /// Stroke straddles the edge; half of it ends up under the photo.
    Centered,
    /// Stroke lies entirely outside the cell.
    Outset,
}

impl BorderPlacement {
    /// How far the visible ring extends beyond the cell edge.
    pub fn outset(self, width: f64) -> f64 {
        match self {
            BorderPlacement::Centered => width / 2.0,
            BorderPlacement::Outset => width,
        }
    }
}

/// Visual style of one theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeSpec {
    pub id: ThemeId,
    pub background: Rgb,
    pub text_color: Rgb,
    pub border_color: Rgb,
    /// Stroke width in pixels. Zero disables cell borders.
    pub border_width: f64,
    pub border_placement: BorderPlacement,
    /// Corner glyphs: top-left, top-right, bottom-left, bottom-right.
    pub decorations: Option<[&'static str; 4]>,
}

/// Identifier of a registered theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    #[default]
    SimpleWhite,
    SimpleBlack,
    Neon,
}

static SIMPLE_WHITE: ThemeSpec = ThemeSpec {
    id: ThemeId::SimpleWhite,
    background: Rgb::hex(0xffffff),
    text_color: Rgb::hex(0x000000),
    border_color: Rgb::hex(0xe0e0e0),
    border_width: 2.0,
    border_placement: BorderPlacement::Centered,
    decorations: Some(["✧", "♥", "✿", "♡"]),
};

static SIMPLE_BLACK: ThemeSpec = ThemeSpec {
    id: ThemeId::SimpleBlack,
    background: Rgb::hex(0x1a1a1a),
    text_color: Rgb::hex(0xffffff),
    border_color: Rgb::hex(0x404040),
    border_width: 2.0,
    border_placement: BorderPlacement::Centered,
    decorations: Some(["☾", "★", "♥", "✦"]),
};

static NEON: ThemeSpec = ThemeSpec {
    id: ThemeId::Neon,
    background: Rgb::hex(0x000000),
    text_color: Rgb::hex(0xff00ff),
    border_color: Rgb::hex(0x00ffff),
    border_width: 3.0,
    border_placement: BorderPlacement::Outset,
    decorations: Some(["⚡", "★", "♥", "♦"]),
};

impl ThemeId {
    pub const ALL: [ThemeId; 3] = [ThemeId::SimpleWhite, ThemeId::SimpleBlack, ThemeId::Neon];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeId::SimpleWhite => "simple-white",
            ThemeId::SimpleBlack => "simple-black",
            ThemeId::Neon => "neon",
        }
    }

    /// The style registered for this id.
    pub fn spec(self) -> &'static ThemeSpec {
        match self {
            ThemeId::SimpleWhite => &SIMPLE_WHITE,
            ThemeId::SimpleBlack => &SIMPLE_BLACK,
            ThemeId::Neon => &NEON,
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = PhotoboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| PhotoboxError::unknown_theme(s))
    }
}

/// Look up a theme by its string id.
pub fn resolve_theme(id: &str) -> Result<&'static ThemeSpec, PhotoboxError> {
    id.parse::<ThemeId>().map(ThemeId::spec)
}
