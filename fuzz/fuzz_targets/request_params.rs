#![no_main]

use codec::{parse_font_name, CodecLimits, RequestDecoder, RequestParams};
use libfuzzer_sys::fuzz_target;
use schema::{ObjectId, Point, Rectangle};

const KEYS: [&str; 6] = [
    "w1.bounds.x",
    "w1.bounds.y",
    "w1.bounds.width",
    "w1.bounds.height",
    "w1.location.x",
    "w1.enabled",
];

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut params = RequestParams::new();
    for (key, value) in KEYS.iter().zip(text.split('\u{0}')) {
        params.insert(*key, value);
    }

    let id = ObjectId::new("w1");
    let decoder = RequestDecoder::with_limits(&params, &CodecLimits::for_testing());
    let _ = decoder.read_bounds(&id, &Rectangle::new(1, 2, 3, 4));
    let _ = decoder.read_point(&id, "location", &Point::default());
    let _ = decoder.read_bool(&id, "enabled", true);

    let families = parse_font_name(&text);
    assert!(families
        .iter()
        .all(|name| !name.contains(['"', '\\', ','])));
});
