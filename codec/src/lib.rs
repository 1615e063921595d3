//! Preserve, compare and encode pipeline for uisync.
//!
//! This is the core crate that ties together schema and wire to keep a
//! client's view of server-held UI state in sync:
//!
//! - Value codecs for every property kind
//! - Preserved-state store with per-cycle staging
//! - Change detection with first-render defaults
//! - Per-object renderers emitting update operations
//! - Request decoding of geometry, primitives and event flags
//!
//! # Design Principles
//!
//! - **Minimal output** - Only changed properties are emitted; a first render
//!   skips values matching the client's construction defaults.
//! - **Atomic cycles** - A cycle commits its baselines or leaves the previous
//!   ones in force.
//! - **Session scoped** - Nothing is shared between sessions except the font
//!   name memo.

mod change;
mod error;
mod font;
mod limits;
mod preserve;
mod render;
mod request;
mod session;
mod types;
mod values;

pub use change::{has_changed, has_changed_or_default, value_changed, value_changed_or_default};
pub use error::{CodecError, CodecResult, LimitKind, ParameterReason};
pub use font::parse_font_name;
pub use limits::CodecLimits;
pub use preserve::{ObjectAdapter, ObjectPreserver, PreservedStore};
pub use render::ObjectRenderer;
pub use request::{
    events, read_bool, read_bounds, read_int, read_point, read_property_value, was_event_sent,
    ParameterSource, RequestDecoder, RequestParams,
};
pub use session::Session;
pub use types::RequestCycle;
pub use values::{
    decode_bool, decode_bounds, decode_int, decode_point, decode_str, encode_bounds,
    encode_color, encode_color_hex, encode_colors, encode_font, encode_fonts, encode_gradient,
    encode_image, encode_images, encode_object_ref, encode_point, encode_rounded_border,
    encode_value, escape_text, replace_new_lines,
};
pub use wire::Limits as WireLimits;
