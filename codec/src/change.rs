//! Change detection against preserved baselines.
//!
//! Equality is the deep equality of [`PropertyValue`]: composites compare
//! field-wise, arrays element-wise, and `Null` equals only `Null`. A
//! property that was never preserved compares as `Null`.

use schema::{ObjectId, PropertyValue};

use crate::error::CodecResult;
use crate::preserve::{ObjectAdapter, PreservedStore};

static NULL: PropertyValue = PropertyValue::Null;

/// Returns `true` if `new` differs from the preserved baseline.
#[must_use]
pub fn value_changed(adapter: &ObjectAdapter, property: &str, new: &PropertyValue) -> bool {
    new != adapter.preserved(property).unwrap_or(&NULL)
}

/// Like [`value_changed`], but compares against `default` until the object
/// is initialized.
///
/// The client builds a new object with its own defaults, so a first render
/// only has to send what differs from them.
#[must_use]
pub fn value_changed_or_default(
    adapter: &ObjectAdapter,
    property: &str,
    new: &PropertyValue,
    default: &PropertyValue,
) -> bool {
    if adapter.is_initialized() {
        value_changed(adapter, property, new)
    } else {
        new != default
    }
}

/// Store-level form of [`value_changed`].
pub fn has_changed(
    store: &PreservedStore,
    id: &ObjectId,
    property: &str,
    new: &PropertyValue,
) -> CodecResult<bool> {
    Ok(value_changed(store.adapter(id)?, property, new))
}

/// Store-level form of [`value_changed_or_default`].
pub fn has_changed_or_default(
    store: &PreservedStore,
    id: &ObjectId,
    property: &str,
    new: &PropertyValue,
    default: &PropertyValue,
) -> CodecResult<bool> {
    Ok(value_changed_or_default(
        store.adapter(id)?,
        property,
        new,
        default,
    ))
}
