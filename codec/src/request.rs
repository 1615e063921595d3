//! Request decoder: typed values out of inbound request parameters.
//!
//! Parameters are flat string pairs. Object properties are keyed by
//! `<id>.<property>`; events use one shared parameter per event type whose
//! value is the identity of the object the event occurred on. A missing
//! parameter, or one holding the literal `null`, yields the caller's
//! default. A present value that does not parse is an error, never a
//! silent default.

use std::collections::{BTreeMap, HashMap};

use schema::{ObjectId, Point, Rectangle};
use tracing::warn;

use crate::error::{CodecError, CodecResult, LimitKind, ParameterReason};
use crate::limits::CodecLimits;

const NULL_LITERAL: &str = "null";

/// Event parameter names.
pub mod events {
    pub const EVENT_HELP: &str = "events.help";
    pub const EVENT_WIDGET_SELECTED: &str = "events.widgetSelected";
    pub const EVENT_WIDGET_DEFAULT_SELECTED: &str = "events.widgetDefaultSelected";
    pub const EVENT_FOCUS_GAINED: &str = "events.focusGained";
    pub const EVENT_FOCUS_LOST: &str = "events.focusLost";
    pub const EVENT_MENU_DETECT: &str = "events.menuDetect";
}

/// Read access to the parameters of one request.
pub trait ParameterSource {
    fn parameter(&self, name: &str) -> Option<&str>;
}

impl ParameterSource for HashMap<String, String> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// An owned parameter map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    params: HashMap<String, String>,
}

impl RequestParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl ParameterSource for RequestParams {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.params.parameter(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Decodes typed values from one request's parameters.
pub struct RequestDecoder<'a, P: ParameterSource + ?Sized> {
    params: &'a P,
    max_parameter_len: usize,
}

impl<'a, P: ParameterSource + ?Sized> RequestDecoder<'a, P> {
    /// Creates a decoder with default limits.
    pub fn new(params: &'a P) -> Self {
        Self::with_limits(params, &CodecLimits::default())
    }

    pub fn with_limits(params: &'a P, limits: &CodecLimits) -> Self {
        Self {
            params,
            max_parameter_len: limits.max_parameter_len,
        }
    }

    fn raw(&self, key: &str) -> CodecResult<Option<&'a str>> {
        let Some(value) = self.params.parameter(key) else {
            return Ok(None);
        };
        if value.len() > self.max_parameter_len {
            warn!(key, len = value.len(), "request parameter too long");
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::ParameterLength,
                limit: self.max_parameter_len,
                actual: value.len(),
            });
        }
        Ok(Some(value))
    }

    /// Returns the raw value of `<id>.<property>`, if submitted.
    pub fn read_property_value(&self, id: &ObjectId, property: &str) -> CodecResult<Option<&'a str>> {
        self.raw(&property_key(id, property))
    }

    pub fn read_int(&self, id: &ObjectId, property: &str, default: i32) -> CodecResult<i32> {
        let key = property_key(id, property);
        match self.raw(&key)? {
            Some(value) if value != NULL_LITERAL => parse_int(&key, value),
            _ => Ok(default),
        }
    }

    pub fn read_bool(&self, id: &ObjectId, property: &str, default: bool) -> CodecResult<bool> {
        let key = property_key(id, property);
        match self.raw(&key)? {
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(NULL_LITERAL) | None => Ok(default),
            Some(value) => Err(invalid(&key, value, ParameterReason::NotABoolean)),
        }
    }

    /// Reads `<id>.<property>.x` and `.y`, each defaulting independently.
    pub fn read_point(&self, id: &ObjectId, property: &str, default: &Point) -> CodecResult<Point> {
        let x = self.read_int(id, &sub_key(property, "x"), default.x)?;
        let y = self.read_int(id, &sub_key(property, "y"), default.y)?;
        Ok(Point::new(x, y))
    }

    /// Reads `<id>.bounds.{x,y,width,height}`, each defaulting independently.
    pub fn read_bounds(&self, id: &ObjectId, default: &Rectangle) -> CodecResult<Rectangle> {
        let property = schema::props::BOUNDS;
        Ok(Rectangle::new(
            self.read_int(id, &sub_key(property, "x"), default.x)?,
            self.read_int(id, &sub_key(property, "y"), default.y)?,
            self.read_int(id, &sub_key(property, "width"), default.width)?,
            self.read_int(id, &sub_key(property, "height"), default.height)?,
        ))
    }

    /// Returns `true` iff the `event` parameter names exactly `id`.
    pub fn was_event_sent(&self, id: &ObjectId, event: &str) -> bool {
        self.params.parameter(event) == Some(id.as_str())
    }
}

/// Reads the raw value of `<id>.<property>` with default limits.
pub fn read_property_value<'a, P: ParameterSource + ?Sized>(
    params: &'a P,
    id: &ObjectId,
    property: &str,
) -> CodecResult<Option<&'a str>> {
    RequestDecoder::new(params).read_property_value(id, property)
}

pub fn read_bounds<P: ParameterSource + ?Sized>(
    params: &P,
    id: &ObjectId,
    default: &Rectangle,
) -> CodecResult<Rectangle> {
    RequestDecoder::new(params).read_bounds(id, default)
}

pub fn read_int<P: ParameterSource + ?Sized>(
    params: &P,
    id: &ObjectId,
    property: &str,
    default: i32,
) -> CodecResult<i32> {
    RequestDecoder::new(params).read_int(id, property, default)
}

pub fn read_bool<P: ParameterSource + ?Sized>(
    params: &P,
    id: &ObjectId,
    property: &str,
    default: bool,
) -> CodecResult<bool> {
    RequestDecoder::new(params).read_bool(id, property, default)
}

pub fn read_point<P: ParameterSource + ?Sized>(
    params: &P,
    id: &ObjectId,
    property: &str,
    default: &Point,
) -> CodecResult<Point> {
    RequestDecoder::new(params).read_point(id, property, default)
}

pub fn was_event_sent<P: ParameterSource + ?Sized>(params: &P, id: &ObjectId, event: &str) -> bool {
    RequestDecoder::new(params).was_event_sent(id, event)
}

fn property_key(id: &ObjectId, property: &str) -> String {
    let mut key = String::with_capacity(id.as_str().len() + 1 + property.len());
    key.push_str(id.as_str());
    key.push('.');
    key.push_str(property);
    key
}

fn sub_key(property: &str, field: &str) -> String {
    format!("{property}.{field}")
}

/// Parses an integer; a decimal value is rounded to the nearest integer.
#[allow(clippy::cast_possible_truncation)]
fn parse_int(key: &str, value: &str) -> CodecResult<i32> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i32>() {
        return Ok(parsed);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .map(f64::round)
        .filter(|rounded| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(rounded))
        .map(|rounded| rounded as i32)
        .ok_or_else(|| invalid(key, value, ParameterReason::NotAnInteger))
}

fn invalid(key: &str, value: &str, reason: ParameterReason) -> CodecError {
    warn!(key, value, %reason, "invalid request parameter");
    CodecError::InvalidParameter {
        key: key.to_owned(),
        value: value.to_owned(),
        reason,
    }
}
