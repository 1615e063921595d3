//! Protocol encoder: compares current values and emits update operations.

use schema::{
    props, Color, Font, Gradient, ImageRef, ObjectId, Point, PropertyValue, Rectangle,
    RoundedBorder,
};
use tracing::{debug, trace};
use wire::{OutboundChannel, WireValue};

use crate::change::{value_changed, value_changed_or_default};
use crate::error::CodecResult;
use crate::preserve::{border_parts, gradient_parts, ObjectAdapter};
use crate::values::{
    encode_bounds, encode_color, encode_font, encode_gradient, encode_object_ref,
    encode_rounded_border, encode_value, escape_text, replace_new_lines,
};

const LINE_BREAK: &str = "<br/>";

/// Renders one object's changed properties into an outbound channel.
///
/// Every `render_*` method returns whether it emitted an operation.
/// Operations appear in the order of the calls; the renderer never writes
/// to preserved state.
pub struct ObjectRenderer<'a, C: OutboundChannel + ?Sized> {
    adapter: &'a ObjectAdapter,
    channel: &'a mut C,
}

impl<'a, C: OutboundChannel + ?Sized> ObjectRenderer<'a, C> {
    pub fn new(adapter: &'a ObjectAdapter, channel: &'a mut C) -> Self {
        Self { adapter, channel }
    }

    #[must_use]
    pub fn id(&self) -> &ObjectId {
        self.adapter.id()
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.adapter.is_initialized()
    }

    /// Emits `property` with the codec for its kind if it changed.
    pub fn render_property(
        &mut self,
        property: &str,
        new: impl Into<PropertyValue>,
        default: impl Into<PropertyValue>,
    ) -> CodecResult<bool> {
        let new = new.into();
        if !value_changed_or_default(self.adapter, property, &new, &default.into()) {
            self.skip(property);
            return Ok(false);
        }
        self.emit(property, encode_value(&new))
    }

    pub fn render_bool(&mut self, property: &str, new: bool, default: bool) -> CodecResult<bool> {
        self.render_property(property, new, default)
    }

    pub fn render_int(&mut self, property: &str, new: i32, default: i32) -> CodecResult<bool> {
        self.render_property(property, new, default)
    }

    pub fn render_str(
        &mut self,
        property: &str,
        new: Option<&str>,
        default: Option<&str>,
    ) -> CodecResult<bool> {
        self.render_property(property, new, default)
    }

    pub fn render_color(
        &mut self,
        property: &str,
        new: Option<&Color>,
        default: Option<&Color>,
    ) -> CodecResult<bool> {
        self.render_property(property, new.copied(), default.copied())
    }

    pub fn render_font_property(
        &mut self,
        property: &str,
        new: Option<&Font>,
        default: Option<&Font>,
    ) -> CodecResult<bool> {
        self.render_property(property, new.cloned(), default.cloned())
    }

    pub fn render_point(
        &mut self,
        property: &str,
        new: Option<&Point>,
        default: Option<&Point>,
    ) -> CodecResult<bool> {
        self.render_property(property, new.copied(), default.copied())
    }

    pub fn render_rectangle(
        &mut self,
        property: &str,
        new: Option<&Rectangle>,
        default: Option<&Rectangle>,
    ) -> CodecResult<bool> {
        self.render_property(property, new.copied(), default.copied())
    }

    pub fn render_image(
        &mut self,
        property: &str,
        new: Option<&ImageRef>,
        default: Option<&ImageRef>,
    ) -> CodecResult<bool> {
        self.render_property(property, new.cloned(), default.cloned())
    }

    pub fn render_object(
        &mut self,
        property: &str,
        new: Option<&ObjectId>,
        default: Option<&ObjectId>,
    ) -> CodecResult<bool> {
        self.render_property(property, new.cloned(), default.cloned())
    }

    pub fn render_colors(
        &mut self,
        property: &str,
        new: Option<&[Option<Color>]>,
        default: Option<&[Option<Color>]>,
    ) -> CodecResult<bool> {
        self.render_property(property, new.map(<[_]>::to_vec), default.map(<[_]>::to_vec))
    }

    pub fn render_fonts(
        &mut self,
        property: &str,
        new: Option<&[Option<Font>]>,
        default: Option<&[Option<Font>]>,
    ) -> CodecResult<bool> {
        self.render_property(property, new.map(<[_]>::to_vec), default.map(<[_]>::to_vec))
    }

    pub fn render_images(
        &mut self,
        property: &str,
        new: Option<&[Option<ImageRef>]>,
        default: Option<&[Option<ImageRef>]>,
    ) -> CodecResult<bool> {
        self.render_property(property, new.map(<[_]>::to_vec), default.map(<[_]>::to_vec))
    }

    /// Attaches or detaches a client listener when the flag changed.
    ///
    /// Never emits a property set.
    pub fn render_listener(
        &mut self,
        listener: &str,
        new: bool,
        default: bool,
    ) -> CodecResult<bool> {
        let key = props::listener_key(listener);
        self.toggle_listener(&key, listener, new, default)
    }

    pub fn render_help_listener(&mut self, attached: bool) -> CodecResult<bool> {
        self.toggle_listener(props::HELP_LISTENER, props::HELP, attached, false)
    }

    /// Emits `bounds` when the object is new or the bounds moved.
    pub fn render_bounds(&mut self, bounds: &Rectangle) -> CodecResult<bool> {
        let new = PropertyValue::Rect(*bounds);
        if self.is_initialized() && !value_changed(self.adapter, props::BOUNDS, &new) {
            self.skip(props::BOUNDS);
            return Ok(false);
        }
        self.emit(props::BOUNDS, encode_bounds(bounds))
    }

    /// Emits the escaped tool tip; `None` is the empty text.
    pub fn render_tool_tip(&mut self, text: Option<&str>) -> CodecResult<bool> {
        let text = text.unwrap_or_default();
        let new = PropertyValue::from(text);
        let default = PropertyValue::from("");
        if !value_changed_or_default(self.adapter, props::TOOL_TIP_TEXT, &new, &default) {
            self.skip(props::TOOL_TIP_TEXT);
            return Ok(false);
        }
        let escaped = replace_new_lines(&escape_text(text, false), LINE_BREAK);
        self.emit(props::TOOL_TIP, escaped.into())
    }

    pub fn render_font(&mut self, font: Option<&Font>) -> CodecResult<bool> {
        let new = PropertyValue::from(font.cloned());
        if !value_changed_or_default(self.adapter, props::FONT, &new, &PropertyValue::Null) {
            self.skip(props::FONT);
            return Ok(false);
        }
        self.emit(props::FONT, encode_font(font))
    }

    pub fn render_foreground(&mut self, color: Option<&Color>) -> CodecResult<bool> {
        self.render_color(props::FOREGROUND, color, None)
    }

    /// Emits `background` when the color or the transparency flag changed.
    ///
    /// A transparent background without a color is sent as transparent black.
    pub fn render_background(
        &mut self,
        color: Option<&Color>,
        transparent: bool,
    ) -> CodecResult<bool> {
        let transparency_changed = value_changed_or_default(
            self.adapter,
            props::BACKGROUND_TRANSPARENCY,
            &PropertyValue::Bool(transparent),
            &PropertyValue::Bool(false),
        );
        let color_changed = value_changed_or_default(
            self.adapter,
            props::BACKGROUND,
            &color.copied().into(),
            &PropertyValue::Null,
        );
        if !transparency_changed && !color_changed {
            self.skip(props::BACKGROUND);
            return Ok(false);
        }
        let value = match (color, transparent) {
            (None, false) => WireValue::Null,
            (None, true) => encode_color(Some(&Color::default()), true),
            (Some(color), transparent) => encode_color(Some(color), transparent),
        };
        self.emit(props::BACKGROUND, value)
    }

    pub fn render_background_gradient(&mut self, gradient: Option<&Gradient>) -> CodecResult<bool> {
        let (colors, percents, vertical) = gradient_parts(gradient);
        let changed = self.any_changed(&[
            (props::BACKGROUND_GRADIENT_COLORS, &colors, &PropertyValue::Null),
            (props::BACKGROUND_GRADIENT_PERCENTS, &percents, &PropertyValue::Null),
            (props::BACKGROUND_GRADIENT_VERTICAL, &vertical, &PropertyValue::Bool(false)),
        ]);
        if !changed {
            self.skip(props::BACKGROUND_GRADIENT);
            return Ok(false);
        }
        self.emit(props::BACKGROUND_GRADIENT, encode_gradient(gradient))
    }

    pub fn render_rounded_border(&mut self, border: Option<&RoundedBorder>) -> CodecResult<bool> {
        let (width, color, radius) = border_parts(border);
        let changed = self.any_changed(&[
            (props::ROUNDED_BORDER_WIDTH, &width, &PropertyValue::Int(0)),
            (props::ROUNDED_BORDER_COLOR, &color, &PropertyValue::Null),
            (
                props::ROUNDED_BORDER_RADIUS,
                &radius,
                &PropertyValue::Rect(Rectangle::default()),
            ),
        ]);
        if !changed {
            self.skip(props::ROUNDED_BORDER);
            return Ok(false);
        }
        self.emit(props::ROUNDED_BORDER, encode_rounded_border(border))
    }

    pub fn render_enabled(&mut self, enabled: bool) -> CodecResult<bool> {
        self.render_bool(props::ENABLED, enabled, true)
    }

    /// Emits `customVariant` as `variant_<name>`, or `null` when unset.
    pub fn render_custom_variant(&mut self, variant: Option<&str>) -> CodecResult<bool> {
        let new = PropertyValue::from(variant);
        if !value_changed_or_default(self.adapter, props::VARIANT, &new, &PropertyValue::Null) {
            self.skip(props::VARIANT);
            return Ok(false);
        }
        let value = variant.map_or(WireValue::Null, |variant| {
            WireValue::Str(format!("{}{variant}", props::VARIANT_PREFIX))
        });
        self.emit(props::CUSTOM_VARIANT, value)
    }

    pub fn render_menu(&mut self, menu: Option<&ObjectId>) -> CodecResult<bool> {
        let new = PropertyValue::from(menu.cloned());
        if !value_changed_or_default(self.adapter, props::MENU, &new, &PropertyValue::Null) {
            self.skip(props::MENU);
            return Ok(false);
        }
        self.emit(props::MENU, encode_object_ref(menu))
    }

    fn toggle_listener(
        &mut self,
        key: &str,
        listener: &str,
        attached: bool,
        default: bool,
    ) -> CodecResult<bool> {
        let new = PropertyValue::Bool(attached);
        if !value_changed_or_default(self.adapter, key, &new, &PropertyValue::Bool(default)) {
            self.skip(key);
            return Ok(false);
        }
        if attached {
            self.channel.add_listener(listener)?;
        } else {
            self.channel.remove_listener(listener)?;
        }
        debug!(object = %self.adapter.id(), listener, attached, "listener toggled");
        Ok(true)
    }

    fn any_changed(&self, parts: &[(&str, &PropertyValue, &PropertyValue)]) -> bool {
        parts.iter().any(|(property, new, default)| {
            value_changed_or_default(self.adapter, property, new, default)
        })
    }

    fn emit(&mut self, name: &str, value: WireValue) -> CodecResult<bool> {
        debug!(object = %self.adapter.id(), property = name, "property emitted");
        self.channel.set_property(name, value)?;
        Ok(true)
    }

    fn skip(&self, property: &str) {
        trace!(object = %self.adapter.id(), property, "property unchanged");
    }
}
