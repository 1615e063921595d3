//! Property definitions and validation.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::{props, PropertyKind, PropertyValue, Rectangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tracked property: its name, kind and client construction default.
///
/// The default is what the client assumes right after it creates the
/// object, so a first render only needs to send values that differ from it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default: PropertyValue,
}

impl PropertyDef {
    /// Creates a property definition with a `Null` default.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: PropertyValue::Null,
        }
    }

    /// Sets the client construction default.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<PropertyValue>) -> Self {
        self.default = default.into();
        self
    }
}

/// An ordered set of property definitions for one object type.
///
/// Order matters: renderers walk the set in order, so the emitted
/// operations follow it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertySet {
    pub properties: Vec<PropertyDef>,
}

impl PropertySet {
    /// Creates a property set after validation.
    pub fn new(properties: Vec<PropertyDef>) -> SchemaResult<Self> {
        let set = Self { properties };
        set.validate()?;
        Ok(set)
    }

    /// Creates a property set builder.
    #[must_use]
    pub fn builder() -> PropertySetBuilder {
        PropertySetBuilder {
            properties: Vec::new(),
        }
    }

    /// Looks up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|def| def.name == name)
    }

    /// Returns the declared default for `name`, or `Null` if unknown.
    #[must_use]
    pub fn default_for(&self, name: &str) -> PropertyValue {
        self.get(name)
            .map_or(PropertyValue::Null, |def| def.default.clone())
    }

    /// Validates set invariants.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut names = HashSet::new();
        for def in &self.properties {
            if def.name.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if !names.insert(def.name.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    name: def.name.clone(),
                });
            }
            validate_default(def)?;
        }
        Ok(())
    }

    /// The properties every widget carries, with their client defaults.
    #[must_use]
    pub fn common() -> Self {
        Self {
            properties: vec![
                PropertyDef::new(props::TOOL_TIP_TEXT, PropertyKind::Str).default_value(""),
                PropertyDef::new(props::MENU, PropertyKind::Object),
                PropertyDef::new(props::ENABLED, PropertyKind::Bool).default_value(true),
                PropertyDef::new(props::FONT, PropertyKind::Font),
                PropertyDef::new(props::FOREGROUND, PropertyKind::Color),
                PropertyDef::new(props::BACKGROUND, PropertyKind::Color),
                PropertyDef::new(props::BACKGROUND_TRANSPARENCY, PropertyKind::Bool)
                    .default_value(false),
                PropertyDef::new(props::ROUNDED_BORDER_WIDTH, PropertyKind::Int).default_value(0),
                PropertyDef::new(props::ROUNDED_BORDER_COLOR, PropertyKind::Color),
                PropertyDef::new(props::ROUNDED_BORDER_RADIUS, PropertyKind::Rect)
                    .default_value(Rectangle::default()),
                PropertyDef::new(props::VARIANT, PropertyKind::Str),
                PropertyDef::new(props::HELP_LISTENER, PropertyKind::Bool).default_value(false),
            ],
        }
    }
}

/// Builder for `PropertySet`.
#[derive(Debug, Default)]
pub struct PropertySetBuilder {
    properties: Vec<PropertyDef>,
}

impl PropertySetBuilder {
    /// Adds a property definition.
    #[must_use]
    pub fn property(mut self, def: PropertyDef) -> Self {
        self.properties.push(def);
        self
    }

    /// Builds the set after validation.
    pub fn build(self) -> SchemaResult<PropertySet> {
        PropertySet::new(self.properties)
    }
}

fn validate_default(def: &PropertyDef) -> SchemaResult<()> {
    match def.default.kind() {
        None => Ok(()),
        Some(found) if found == def.kind => Ok(()),
        Some(found) => Err(SchemaError::DefaultKindMismatch {
            name: def.name.clone(),
            expected: def.kind,
            found,
        }),
    }
}
