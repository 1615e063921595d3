//! Property value model for uisync.
//!
//! This crate defines how server-held UI element state is represented:
//! - Object identities
//! - Typed property values (primitives, colors, fonts, geometry, images,
//!   object references, gradients, rounded borders, arrays)
//! - Property definitions with client construction defaults
//! - Well-known property names
//!
//! # Design Principles
//!
//! - **Closed value set** - Every value is one variant of `PropertyValue`; codecs
//!   dispatch on the tag, never on runtime type inspection.
//! - **Deep equality** - `PartialEq` is the change-detection rule.
//! - **No wire knowledge** - Encoding lives in the codec crate.

mod error;
mod graphics;
mod id;
pub mod props;
mod schema;
mod value;

pub use error::{SchemaError, SchemaResult};
pub use graphics::{Color, Font, Gradient, ImageRef, Point, Rectangle, RoundedBorder};
pub use id::ObjectId;
pub use schema::{PropertyDef, PropertySet, PropertySetBuilder};
pub use value::{PropertyKind, PropertyValue};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        // Verify all expected items are exported
        let _ = ObjectId::new("w1");
        let _ = Color::new(0, 0, 0);
        let _ = Rectangle::default();
        let _ = PropertyValue::Null;
        let _ = PropertyKind::Bool;
        let _ = PropertySet::common();

        // Error types
        let _: SchemaResult<()> = Ok(());
    }

    #[test]
    fn props_module_public() {
        assert_eq!(props::TOOL_TIP_TEXT, "toolTipText");
        assert_eq!(props::listener_key("help"), "listener_help");
    }
}
