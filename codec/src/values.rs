//! Value codecs: typed property values to wire values and back.
//!
//! Every encoder is pure. `None` inputs are valid and encode to
//! `WireValue::Null`; no encoder fails. Decoding is only defined for the
//! kinds a client ever submits: points, rectangles and primitives.

use schema::{Color, Font, Gradient, ImageRef, ObjectId, Point, PropertyValue, Rectangle, RoundedBorder};
use wire::WireValue;

use crate::font::parse_font_name;

const ALPHA_OPAQUE: u8 = 255;
const ALPHA_TRANSPARENT: u8 = 0;

/// Encodes a color as `[r, g, b, a]`.
///
/// Alpha is 0 when `transparent` is set or the color itself is
/// transparent, 255 otherwise.
#[must_use]
pub fn encode_color(color: Option<&Color>, transparent: bool) -> WireValue {
    let Some(color) = color else {
        return WireValue::Null;
    };
    let alpha = if transparent || color.transparent {
        ALPHA_TRANSPARENT
    } else {
        ALPHA_OPAQUE
    };
    WireValue::Array(vec![
        color.red.into(),
        color.green.into(),
        color.blue.into(),
        alpha.into(),
    ])
}

/// Encodes a color in its CSS form, `#rrggbb`.
#[must_use]
pub fn encode_color_hex(color: Option<&Color>) -> WireValue {
    color.map_or(WireValue::Null, |color| WireValue::Str(color.to_hex()))
}

/// Encodes a font as `[[names...], height, bold, italic]`.
#[must_use]
pub fn encode_font(font: Option<&Font>) -> WireValue {
    let Some(font) = font else {
        return WireValue::Null;
    };
    let names = parse_font_name(&font.name)
        .iter()
        .map(|name| WireValue::from(name.as_str()))
        .collect();
    WireValue::Array(vec![
        WireValue::Array(names),
        font.height.into(),
        font.bold.into(),
        font.italic.into(),
    ])
}

#[must_use]
pub fn encode_point(point: Option<&Point>) -> WireValue {
    point.map_or(WireValue::Null, |point| {
        WireValue::Array(vec![point.x.into(), point.y.into()])
    })
}

/// Encodes bounds as `[x, y, width, height]`. Bounds have no null form.
#[must_use]
pub fn encode_bounds(bounds: &Rectangle) -> WireValue {
    WireValue::Array(vec![
        bounds.x.into(),
        bounds.y.into(),
        bounds.width.into(),
        bounds.height.into(),
    ])
}

#[must_use]
pub fn encode_object_ref(id: Option<&ObjectId>) -> WireValue {
    id.map_or(WireValue::Null, |id| WireValue::from(id.as_str()))
}

/// Encodes an image as `[path, width, height]`.
#[must_use]
pub fn encode_image(image: Option<&ImageRef>) -> WireValue {
    image.map_or(WireValue::Null, |image| {
        WireValue::Array(vec![
            image.path.as_str().into(),
            image.width.into(),
            image.height.into(),
        ])
    })
}

/// Encodes colors element-wise, keeping `None` holes as `null`.
#[must_use]
pub fn encode_colors(colors: &[Option<Color>]) -> WireValue {
    WireValue::Array(
        colors
            .iter()
            .map(|color| encode_color(color.as_ref(), false))
            .collect(),
    )
}

#[must_use]
pub fn encode_fonts(fonts: &[Option<Font>]) -> WireValue {
    WireValue::Array(fonts.iter().map(|font| encode_font(font.as_ref())).collect())
}

#[must_use]
pub fn encode_images(images: &[Option<ImageRef>]) -> WireValue {
    WireValue::Array(
        images
            .iter()
            .map(|image| encode_image(image.as_ref()))
            .collect(),
    )
}

/// Encodes a gradient as `[["#rrggbb"...], [percent...], vertical]`.
#[must_use]
pub fn encode_gradient(gradient: Option<&Gradient>) -> WireValue {
    let Some(gradient) = gradient else {
        return WireValue::Null;
    };
    let colors = gradient
        .colors
        .iter()
        .map(|color| WireValue::Str(color.to_hex()))
        .collect();
    let percents = gradient
        .percents
        .iter()
        .map(|percent| WireValue::from(*percent))
        .collect();
    WireValue::Array(vec![
        WireValue::Array(colors),
        WireValue::Array(percents),
        gradient.vertical.into(),
    ])
}

/// Encodes a rounded border as `[width, "#rrggbb", rx, ry, rw, rh]`.
///
/// Invisible borders (width <= 0 or no color) encode to `null`.
#[must_use]
pub fn encode_rounded_border(border: Option<&RoundedBorder>) -> WireValue {
    let Some(border) = border else {
        return WireValue::Null;
    };
    let Some(color) = border.color.filter(|_| border.width > 0) else {
        return WireValue::Null;
    };
    let radius = &border.radius;
    WireValue::Array(vec![
        border.width.into(),
        WireValue::Str(color.to_hex()),
        radius.x.into(),
        radius.y.into(),
        radius.width.into(),
        radius.height.into(),
    ])
}

/// Encodes any property value with the codec for its kind.
#[must_use]
pub fn encode_value(value: &PropertyValue) -> WireValue {
    match value {
        PropertyValue::Null => WireValue::Null,
        PropertyValue::Bool(value) => (*value).into(),
        PropertyValue::Int(value) => (*value).into(),
        PropertyValue::Str(value) => value.as_str().into(),
        PropertyValue::Color(color) => encode_color(Some(color), false),
        PropertyValue::Font(font) => encode_font(Some(font)),
        PropertyValue::Point(point) => encode_point(Some(point)),
        PropertyValue::Rect(rect) => encode_bounds(rect),
        PropertyValue::Image(image) => encode_image(Some(image)),
        PropertyValue::Object(id) => encode_object_ref(Some(id)),
        PropertyValue::Gradient(gradient) => encode_gradient(Some(gradient)),
        PropertyValue::Border(border) => encode_rounded_border(Some(border)),
        PropertyValue::Array(items) => WireValue::Array(items.iter().map(encode_value).collect()),
    }
}

#[must_use]
pub fn decode_bool(value: &WireValue) -> Option<bool> {
    match value {
        WireValue::Bool(value) => Some(*value),
        _ => None,
    }
}

/// Decodes an integer that fits in `i32`.
#[must_use]
pub fn decode_int(value: &WireValue) -> Option<i32> {
    value.as_int().and_then(|value| i32::try_from(value).ok())
}

#[must_use]
pub fn decode_str(value: &WireValue) -> Option<&str> {
    value.as_str()
}

/// Decodes `[x, y]`.
#[must_use]
pub fn decode_point(value: &WireValue) -> Option<Point> {
    match value.as_array()? {
        [x, y] => Some(Point::new(decode_int(x)?, decode_int(y)?)),
        _ => None,
    }
}

/// Decodes `[x, y, width, height]`.
#[must_use]
pub fn decode_bounds(value: &WireValue) -> Option<Rectangle> {
    match value.as_array()? {
        [x, y, width, height] => Some(Rectangle::new(
            decode_int(x)?,
            decode_int(y)?,
            decode_int(width)?,
            decode_int(height)?,
        )),
        _ => None,
    }
}

/// Replaces the reserved markup characters with their entities.
///
/// `&`, `<`, `>` and `"` become entities, U+2028 and U+2029 become numeric
/// entities, and the result ends at the first NUL. With `mnemonics` set a
/// single `&` marks a mnemonic and is dropped, while `&&` renders as one
/// escaped ampersand.
#[must_use]
pub fn escape_text(text: &str, mnemonics: bool) -> String {
    let text = text.split('\0').next().unwrap_or_default();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut insert_amp = false;
    while let Some(ch) = chars.next() {
        match ch {
            '&' => {
                if !mnemonics || insert_amp {
                    insert_amp = false;
                    out.push_str("&amp;");
                } else if chars.peek() == Some(&'&') {
                    insert_amp = true;
                }
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\u{2028}' | '\u{2029}' => {
                out.push_str("&#");
                out.push_str(&u32::from(ch).to_string());
                out.push(';');
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Replaces every line break (`\r\n`, `\n` or `\r`) with `replacement`.
#[must_use]
pub fn replace_new_lines(text: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(replacement);
            }
            '\n' => out.push_str(replacement),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> WireValue {
        WireValue::Array(values.iter().map(|v| WireValue::Int(*v)).collect())
    }

    #[test]
    fn color_opaque_and_transparent() {
        let red = Color::new(255, 0, 0);
        assert_eq!(encode_color(Some(&red), false), ints(&[255, 0, 0, 255]));
        assert_eq!(encode_color(Some(&red), true), ints(&[255, 0, 0, 0]));
        assert_eq!(encode_color(None, false), WireValue::Null);
        assert_eq!(encode_color(None, true), WireValue::Null);
    }

    #[test]
    fn transparent_color_encodes_alpha_zero() {
        let clear = Color::new(10, 20, 30).with_transparency(true);
        assert_eq!(encode_color(Some(&clear), false), ints(&[10, 20, 30, 0]));
        assert_eq!(
            encode_value(&PropertyValue::Color(clear)),
            ints(&[10, 20, 30, 0])
        );
        assert_eq!(
            encode_colors(&[Some(clear), Some(Color::new(1, 1, 1))]),
            WireValue::Array(vec![ints(&[10, 20, 30, 0]), ints(&[1, 1, 1, 255])])
        );
    }

    #[test]
    fn color_hex() {
        let color = Color::new(0, 128, 255);
        assert_eq!(encode_color_hex(Some(&color)), WireValue::from("#0080ff"));
        assert_eq!(encode_color_hex(None), WireValue::Null);
    }

    #[test]
    fn font_encodes_cleaned_names() {
        let font = Font::new("Arial, \"Helvetica\"", 12).italic(true);
        let expected = WireValue::Array(vec![
            WireValue::Array(vec!["Arial".into(), "Helvetica".into()]),
            WireValue::Int(12),
            WireValue::Bool(false),
            WireValue::Bool(true),
        ]);
        assert_eq!(encode_font(Some(&font)), expected);
        assert_eq!(encode_font(None), WireValue::Null);
    }

    #[test]
    fn geometry() {
        assert_eq!(encode_point(Some(&Point::new(3, -4))), ints(&[3, -4]));
        assert_eq!(encode_point(None), WireValue::Null);
        assert_eq!(
            encode_bounds(&Rectangle::new(10, 20, 100, 50)),
            ints(&[10, 20, 100, 50])
        );
    }

    #[test]
    fn object_ref_and_image() {
        let id = ObjectId::new("m3");
        assert_eq!(encode_object_ref(Some(&id)), WireValue::from("m3"));
        assert_eq!(encode_object_ref(None), WireValue::Null);

        let image = ImageRef::new("rsrc/a.png", 16, 8);
        assert_eq!(
            encode_image(Some(&image)),
            WireValue::Array(vec!["rsrc/a.png".into(), WireValue::Int(16), WireValue::Int(8)])
        );
    }

    #[test]
    fn arrays_keep_null_holes() {
        let colors = [Some(Color::new(1, 2, 3)), None];
        assert_eq!(
            encode_colors(&colors),
            WireValue::Array(vec![ints(&[1, 2, 3, 255]), WireValue::Null])
        );
        assert_eq!(
            encode_images(&[None, None]),
            WireValue::Array(vec![WireValue::Null, WireValue::Null])
        );
        assert_eq!(
            encode_fonts(&[None, Some(Font::new("Tahoma", 9))]).array_len(),
            Some(2)
        );
    }

    #[test]
    fn gradient() {
        let gradient = Gradient::new(
            vec![Color::new(255, 0, 0), Color::new(0, 0, 255)],
            vec![0, 100],
            true,
        );
        let expected = WireValue::Array(vec![
            WireValue::Array(vec!["#ff0000".into(), "#0000ff".into()]),
            ints(&[0, 100]),
            WireValue::Bool(true),
        ]);
        assert_eq!(encode_gradient(Some(&gradient)), expected);
        assert_eq!(encode_gradient(None), WireValue::Null);
    }

    #[test]
    fn rounded_border() {
        let border = RoundedBorder::new(2, Some(Color::new(0, 0, 0)), Rectangle::new(1, 2, 3, 4));
        let expected = WireValue::Array(vec![
            WireValue::Int(2),
            "#000000".into(),
            WireValue::Int(1),
            WireValue::Int(2),
            WireValue::Int(3),
            WireValue::Int(4),
        ]);
        assert_eq!(encode_rounded_border(Some(&border)), expected);

        let no_width = RoundedBorder { width: 0, ..border };
        assert_eq!(encode_rounded_border(Some(&no_width)), WireValue::Null);
        let no_color = RoundedBorder { color: None, ..border };
        assert_eq!(encode_rounded_border(Some(&no_color)), WireValue::Null);
        assert_eq!(encode_rounded_border(None), WireValue::Null);
    }

    #[test]
    fn generic_dispatch() {
        assert_eq!(encode_value(&PropertyValue::Null), WireValue::Null);
        assert_eq!(encode_value(&"Hi".into()), WireValue::from("Hi"));
        assert_eq!(encode_value(&PropertyValue::Int(5)), WireValue::Int(5));
        assert_eq!(
            encode_value(&PropertyValue::from(Color::new(255, 0, 0))),
            ints(&[255, 0, 0, 255])
        );
        let array: PropertyValue = vec![Some(Point::new(1, 2)), None].into();
        assert_eq!(
            encode_value(&array),
            WireValue::Array(vec![ints(&[1, 2]), WireValue::Null])
        );
    }

    #[test]
    fn decode_geometry() {
        assert_eq!(decode_point(&ints(&[1, 2])), Some(Point::new(1, 2)));
        assert_eq!(decode_point(&ints(&[1])), None);
        assert_eq!(
            decode_bounds(&ints(&[1, 2, 3, 4])),
            Some(Rectangle::new(1, 2, 3, 4))
        );
        assert_eq!(decode_bounds(&WireValue::Null), None);
        assert_eq!(decode_bounds(&ints(&[1, 2, 3, i64::MAX])), None);
    }

    #[test]
    fn decode_primitives() {
        assert_eq!(decode_bool(&WireValue::Bool(true)), Some(true));
        assert_eq!(decode_bool(&WireValue::Int(1)), None);
        assert_eq!(decode_int(&WireValue::Int(-7)), Some(-7));
        assert_eq!(decode_str(&WireValue::from("x")), Some("x"));
    }

    #[test]
    fn escape_markup() {
        assert_eq!(
            escape_text("<a href=\"x\">&</a>", false),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_mnemonics() {
        assert_eq!(escape_text("&File", true), "File");
        assert_eq!(escape_text("Save && Exit", true), "Save &amp; Exit");
        assert_eq!(escape_text("Save && Exit", false), "Save &amp;&amp; Exit");
    }

    #[test]
    fn escape_line_separators_and_nul() {
        assert_eq!(escape_text("a\u{2028}b\u{2029}", false), "a&#8232;b&#8233;");
        assert_eq!(escape_text("visible\0hidden", false), "visible");
    }

    #[test]
    fn new_lines_replaced() {
        assert_eq!(replace_new_lines("a\r\nb\nc\rd", "<br/>"), "a<br/>b<br/>c<br/>d");
        assert_eq!(replace_new_lines("\n\n", "|"), "||");
    }
}
