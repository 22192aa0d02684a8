#![no_main]

use libfuzzer_sys::fuzz_target;
use trackline::{decode, encode};

fuzz_target!(|data: &[u8]| {
    // Any string that decodes cleanly is a fixed-point path
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(first) = decode(s, 5) else {
        return;
    };

    // Property: once on the grid, encode/decode is the identity
    let encoded = encode(&first, 5).expect("decoded coordinates must re-encode");
    let second = decode(&encoded, 5).expect("re-encoded polyline must decode");
    assert_eq!(first, second, "second round trip changed coordinates");

    let encoded_again = encode(&second, 5).expect("decoded coordinates must re-encode");
    assert_eq!(encoded, encoded_again, "encoding not idempotent");
});
