#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let limits = wire::Limits::for_testing();
    if let Ok(message) = wire::decode_message(json, &limits) {
        let encoded = wire::encode_message(&message).expect("decoded message re-encodes");
        let again = wire::decode_message(&encoded, &limits).expect("re-encoded message decodes");
        assert_eq!(again, message);
    }
});
