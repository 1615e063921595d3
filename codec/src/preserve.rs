//! Preserved-state store: per-object comparison baselines.
//!
//! Adapters live in an arena indexed by identity. Preserve writes made
//! during a cycle are staged; reads see the staged value over the committed
//! one. [`PreservedStore::commit`] folds the staged values into the
//! baseline and [`PreservedStore::rollback`] throws them away, so a failed
//! cycle leaves the previous baseline authoritative.

use std::collections::HashMap;

use schema::{
    props, Color, Font, Gradient, ObjectId, PropertyValue, Rectangle, RoundedBorder,
};

use crate::error::{CodecError, CodecResult, LimitKind};

/// Per-object preserved state.
#[derive(Debug, Clone)]
pub struct ObjectAdapter {
    id: ObjectId,
    initialized: bool,
    rendered: bool,
    committed: HashMap<String, PropertyValue>,
    staged: HashMap<String, PropertyValue>,
}

impl ObjectAdapter {
    fn new(id: ObjectId) -> Self {
        Self {
            id,
            initialized: false,
            rendered: false,
            committed: HashMap::new(),
            staged: HashMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Records `value` as this cycle's baseline for `property`.
    ///
    /// A later call for the same property in the same cycle overwrites it.
    pub fn preserve(&mut self, property: &str, value: impl Into<PropertyValue>) {
        self.staged.insert(property.to_owned(), value.into());
    }

    /// Returns the last recorded baseline for `property`.
    #[must_use]
    pub fn preserved(&self, property: &str) -> Option<&PropertyValue> {
        self.staged
            .get(property)
            .or_else(|| self.committed.get(property))
    }

    /// Returns `true` once the object has completed a committed render.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_rendered(&mut self) {
        self.rendered = true;
    }

    fn commit(&mut self) -> bool {
        self.committed.extend(self.staged.drain());
        let newly_initialized = self.rendered && !self.initialized;
        if self.rendered {
            self.initialized = true;
            self.rendered = false;
        }
        newly_initialized
    }

    fn rollback(&mut self) {
        self.staged.clear();
        self.rendered = false;
    }
}

/// Arena of object adapters keyed by identity.
#[derive(Debug, Clone)]
pub struct PreservedStore {
    adapters: Vec<ObjectAdapter>,
    index: HashMap<ObjectId, usize>,
    max_objects: usize,
}

impl Default for PreservedStore {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl PreservedStore {
    /// Creates an empty store holding at most `max_objects` adapters.
    #[must_use]
    pub fn new(max_objects: usize) -> Self {
        Self {
            adapters: Vec::new(),
            index: HashMap::new(),
            max_objects,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.index.contains_key(id)
    }

    /// Attaches a fresh, uninitialized adapter for `id`.
    pub fn register(&mut self, id: ObjectId) -> CodecResult<()> {
        if self.index.contains_key(&id) {
            return Err(CodecError::DuplicateObject { id });
        }
        if self.adapters.len() >= self.max_objects {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::Objects,
                limit: self.max_objects,
                actual: self.adapters.len() + 1,
            });
        }
        self.index.insert(id.clone(), self.adapters.len());
        self.adapters.push(ObjectAdapter::new(id));
        Ok(())
    }

    /// Removes the adapter for `id` together with all of its baselines.
    pub fn dispose(&mut self, id: &ObjectId) -> CodecResult<ObjectAdapter> {
        let slot = self
            .index
            .remove(id)
            .ok_or_else(|| CodecError::UnknownObject { id: id.clone() })?;
        let removed = self.adapters.swap_remove(slot);
        if let Some(moved) = self.adapters.get(slot) {
            self.index.insert(moved.id.clone(), slot);
        }
        Ok(removed)
    }

    pub fn adapter(&self, id: &ObjectId) -> CodecResult<&ObjectAdapter> {
        self.index
            .get(id)
            .and_then(|slot| self.adapters.get(*slot))
            .ok_or_else(|| CodecError::UnknownObject { id: id.clone() })
    }

    pub fn adapter_mut(&mut self, id: &ObjectId) -> CodecResult<&mut ObjectAdapter> {
        match self.index.get(id) {
            Some(slot) => self
                .adapters
                .get_mut(*slot)
                .ok_or_else(|| CodecError::UnknownObject { id: id.clone() }),
            None => Err(CodecError::UnknownObject { id: id.clone() }),
        }
    }

    pub fn preserve(
        &mut self,
        id: &ObjectId,
        property: &str,
        value: impl Into<PropertyValue>,
    ) -> CodecResult<()> {
        self.adapter_mut(id)?.preserve(property, value);
        Ok(())
    }

    pub fn preserved(&self, id: &ObjectId, property: &str) -> CodecResult<Option<&PropertyValue>> {
        Ok(self.adapter(id)?.preserved(property))
    }

    pub fn is_initialized(&self, id: &ObjectId) -> CodecResult<bool> {
        Ok(self.adapter(id)?.is_initialized())
    }

    /// Folds staged baselines into the committed ones and marks every
    /// rendered object initialized. Returns the number of objects that
    /// became initialized.
    pub fn commit(&mut self) -> usize {
        self.adapters
            .iter_mut()
            .map(ObjectAdapter::commit)
            .filter(|initialized| *initialized)
            .count()
    }

    /// Discards staged baselines and render marks.
    pub fn rollback(&mut self) {
        self.adapters.iter_mut().for_each(ObjectAdapter::rollback);
    }

    /// Iterates adapters in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectAdapter> {
        self.adapters.iter()
    }
}

/// Preserved forms of the three gradient sub-properties.
pub(crate) fn gradient_parts(
    gradient: Option<&Gradient>,
) -> (PropertyValue, PropertyValue, PropertyValue) {
    match gradient {
        Some(gradient) => (
            gradient.colors.clone().into(),
            gradient.percents.clone().into(),
            gradient.vertical.into(),
        ),
        None => (PropertyValue::Null, PropertyValue::Null, false.into()),
    }
}

/// Preserved forms of the three rounded-border sub-properties.
pub(crate) fn border_parts(
    border: Option<&RoundedBorder>,
) -> (PropertyValue, PropertyValue, PropertyValue) {
    let border = border.copied().unwrap_or_default();
    (
        border.width.into(),
        border.color.into(),
        border.radius.into(),
    )
}

/// Typed `preserve_*` entry points for one object.
pub struct ObjectPreserver<'a> {
    adapter: &'a mut ObjectAdapter,
}

impl<'a> ObjectPreserver<'a> {
    pub(crate) fn new(adapter: &'a mut ObjectAdapter) -> Self {
        Self { adapter }
    }

    #[must_use]
    pub fn id(&self) -> &ObjectId {
        self.adapter.id()
    }

    pub fn preserve_property(&mut self, property: &str, value: impl Into<PropertyValue>) -> &mut Self {
        self.adapter.preserve(property, value);
        self
    }

    pub fn preserve_bounds(&mut self, bounds: Rectangle) -> &mut Self {
        self.preserve_property(props::BOUNDS, bounds)
    }

    pub fn preserve_tool_tip(&mut self, text: Option<&str>) -> &mut Self {
        self.preserve_property(props::TOOL_TIP_TEXT, text.unwrap_or_default())
    }

    pub fn preserve_font(&mut self, font: Option<&Font>) -> &mut Self {
        self.preserve_property(props::FONT, font.cloned())
    }

    pub fn preserve_foreground(&mut self, color: Option<&Color>) -> &mut Self {
        self.preserve_property(props::FOREGROUND, color.copied())
    }

    pub fn preserve_background(&mut self, color: Option<&Color>, transparent: bool) -> &mut Self {
        self.preserve_property(props::BACKGROUND, color.copied())
            .preserve_property(props::BACKGROUND_TRANSPARENCY, transparent)
    }

    pub fn preserve_background_gradient(&mut self, gradient: Option<&Gradient>) -> &mut Self {
        let (colors, percents, vertical) = gradient_parts(gradient);
        self.preserve_property(props::BACKGROUND_GRADIENT_COLORS, colors)
            .preserve_property(props::BACKGROUND_GRADIENT_PERCENTS, percents)
            .preserve_property(props::BACKGROUND_GRADIENT_VERTICAL, vertical)
    }

    pub fn preserve_rounded_border(&mut self, border: Option<&RoundedBorder>) -> &mut Self {
        let (width, color, radius) = border_parts(border);
        self.preserve_property(props::ROUNDED_BORDER_WIDTH, width)
            .preserve_property(props::ROUNDED_BORDER_COLOR, color)
            .preserve_property(props::ROUNDED_BORDER_RADIUS, radius)
    }

    pub fn preserve_enabled(&mut self, enabled: bool) -> &mut Self {
        self.preserve_property(props::ENABLED, enabled)
    }

    pub fn preserve_custom_variant(&mut self, variant: Option<&str>) -> &mut Self {
        self.preserve_property(props::VARIANT, variant)
    }

    pub fn preserve_menu(&mut self, menu: Option<&ObjectId>) -> &mut Self {
        self.preserve_property(props::MENU, menu.cloned())
    }

    /// Preserves whether the server listens for `listener` events.
    pub fn preserve_listener(&mut self, listener: &str, attached: bool) -> &mut Self {
        let key = props::listener_key(listener);
        self.preserve_property(&key, attached)
    }

    pub fn preserve_help_listener(&mut self, attached: bool) -> &mut Self {
        self.preserve_property(props::HELP_LISTENER, attached)
    }
}
