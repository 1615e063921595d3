//! Composite visual value types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An RGB color, 0-255 per channel, with an optional transparency flag.
///
/// A transparent color encodes with alpha 0. The `background` property
/// also carries a separate transparency flag that applies on top of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub transparent: bool,
}

impl Color {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            transparent: false,
        }
    }

    #[must_use]
    pub const fn with_transparency(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Returns the CSS form of the color, `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// A font descriptor.
///
/// `name` holds the raw, comma separated family list exactly as the
/// application supplied it (e.g. `Arial, "Helvetica", sans`). It is split
/// and cleaned only when encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Font {
    pub name: String,
    /// Point size.
    pub height: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bold: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub italic: bool,
}

impl Font {
    /// Creates a regular (neither bold nor italic) font.
    #[must_use]
    pub fn new(name: impl Into<String>, height: i32) -> Self {
        Self {
            name: name.into(),
            height,
            bold: false,
            italic: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    #[must_use]
    pub const fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

/// A point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle; used for widget bounds and for corner radii.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A reference to a registered image resource.
///
/// Storage of the image itself happens elsewhere; only the public path and
/// the image dimensions are known here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageRef {
    pub path: String,
    pub width: i32,
    pub height: i32,
}

impl ImageRef {
    #[must_use]
    pub fn new(path: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }
}

/// A background gradient.
///
/// `colors` and `percents` are parallel lists; the application is
/// responsible for keeping them the same length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gradient {
    pub colors: Vec<Color>,
    pub percents: Vec<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vertical: bool,
}

impl Gradient {
    #[must_use]
    pub fn new(colors: Vec<Color>, percents: Vec<i32>, vertical: bool) -> Self {
        Self {
            colors,
            percents,
            vertical,
        }
    }
}

/// A rounded border.
///
/// The border is only drawn when `width > 0` and a color is set. The
/// corner radii reuse [`Rectangle`]: `x` is top-left, `y` top-right,
/// `width` bottom-right and `height` bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundedBorder {
    pub width: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<Color>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub radius: Rectangle,
}

impl RoundedBorder {
    #[must_use]
    pub const fn new(width: i32, color: Option<Color>, radius: Rectangle) -> Self {
        Self {
            width,
            color,
            radius,
        }
    }

    /// Returns `true` if the border is visible on the client.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.width > 0 && self.color.is_some()
    }
}
