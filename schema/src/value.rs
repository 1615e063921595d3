//! Property values and their kinds.

use crate::{Color, Font, Gradient, ImageRef, ObjectId, Point, Rectangle, RoundedBorder};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a property value (tag only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PropertyKind {
    Bool,
    Int,
    Str,
    Color,
    Font,
    Point,
    Rect,
    Image,
    Object,
    Gradient,
    Border,
    Array,
}

impl PropertyKind {
    /// Returns a stable lowercase name, used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Str => "string",
            Self::Color => "color",
            Self::Font => "font",
            Self::Point => "point",
            Self::Rect => "rectangle",
            Self::Image => "image",
            Self::Object => "object",
            Self::Gradient => "gradient",
            Self::Border => "rounded border",
            Self::Array => "array",
        }
    }
}

/// A typed property value as held by server-side state.
///
/// Equality is deep: composite values compare field-wise and arrays compare
/// element-wise (same length, same order, `Null` holes at the same
/// positions). `Null` equals only `Null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PropertyValue {
    /// Absent value, or an explicit `null` for nullable kinds.
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Str(String),
    Color(Color),
    Font(Font),
    Point(Point),
    Rect(Rectangle),
    Image(ImageRef),
    Object(ObjectId),
    Gradient(Gradient),
    Border(RoundedBorder),
    Array(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Returns the kind of this value, or `None` for `Null`.
    #[must_use]
    pub const fn kind(&self) -> Option<PropertyKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(PropertyKind::Bool),
            Self::Int(_) => Some(PropertyKind::Int),
            Self::Str(_) => Some(PropertyKind::Str),
            Self::Color(_) => Some(PropertyKind::Color),
            Self::Font(_) => Some(PropertyKind::Font),
            Self::Point(_) => Some(PropertyKind::Point),
            Self::Rect(_) => Some(PropertyKind::Rect),
            Self::Image(_) => Some(PropertyKind::Image),
            Self::Object(_) => Some(PropertyKind::Object),
            Self::Gradient(_) => Some(PropertyKind::Gradient),
            Self::Border(_) => Some(PropertyKind::Border),
            Self::Array(_) => Some(PropertyKind::Array),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_rect(&self) -> Option<&Rectangle> {
        match self {
            Self::Rect(value) => Some(value),
            _ => None,
        }
    }
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    i32 => Int,
    String => Str,
    Color => Color,
    Font => Font,
    Point => Point,
    Rectangle => Rect,
    ImageRef => Image,
    ObjectId => Object,
    Gradient => Gradient,
    RoundedBorder => Border,
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<&ObjectId> for PropertyValue {
    fn from(value: &ObjectId) -> Self {
        Self::Object(value.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for PropertyValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}
