//! Well-known property and listener names.
//!
//! Names used as preserved-state keys are separate from the names the
//! client protocol uses where the two differ (tool tip, custom variant,
//! background gradient, rounded border).

/// Widget bounds, preserved and rendered under the same name.
pub const BOUNDS: &str = "bounds";
/// Context menu reference.
pub const MENU: &str = "menu";
/// Enabled state.
pub const ENABLED: &str = "enabled";
pub const FONT: &str = "font";
pub const FOREGROUND: &str = "foreground";
pub const BACKGROUND: &str = "background";
pub const BACKGROUND_TRANSPARENCY: &str = "backgroundTrans";

pub const TOOL_TIP_TEXT: &str = "toolTipText";
pub const TOOL_TIP: &str = "toolTip";

pub const VARIANT: &str = "variant";
pub const CUSTOM_VARIANT: &str = "customVariant";
/// Prefix the client expects on custom variant names.
pub const VARIANT_PREFIX: &str = "variant_";

pub const BACKGROUND_GRADIENT_COLORS: &str = "backgroundGradientColors";
pub const BACKGROUND_GRADIENT_PERCENTS: &str = "backgroundGradientPercents";
pub const BACKGROUND_GRADIENT_VERTICAL: &str = "backgroundGradientVertical";
pub const BACKGROUND_GRADIENT: &str = "backgroundGradient";

pub const ROUNDED_BORDER_WIDTH: &str = "roundedBorderWidth";
pub const ROUNDED_BORDER_COLOR: &str = "roundedBorderColor";
pub const ROUNDED_BORDER_RADIUS: &str = "roundedBorderRadius";
pub const ROUNDED_BORDER: &str = "roundedBorder";

/// Preserved key for the help listener flag.
pub const HELP_LISTENER: &str = "helpListener";
/// Listener name announced to the client for help requests.
pub const HELP: &str = "help";

/// Prefix for preserved listener flags (`listener_<name>`).
pub const LISTENER_PREFIX: &str = "listener_";

/// Returns the preserved-state key for a listener flag.
#[must_use]
pub fn listener_key(listener: &str) -> String {
    let mut key = String::with_capacity(LISTENER_PREFIX.len() + listener.len());
    key.push_str(LISTENER_PREFIX);
    key.push_str(listener);
    key
}
