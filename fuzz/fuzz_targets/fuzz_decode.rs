#![no_main]

use libfuzzer_sys::fuzz_target;
use trackline::{decode, Decoder};

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes to the decoder - should never panic or read past the input
    let items: Vec<_> = Decoder::from_bytes(data, 5).collect();

    // At most one error, and only as the last item
    if let Some(pos) = items.iter().position(Result::is_err) {
        assert_eq!(pos, items.len() - 1, "decoder yielded items after an error");
        let err = items[pos].unwrap_err();
        assert!(err.offset() <= data.len(), "error offset past input");
    }

    // The batch decoder agrees with the streaming one
    if let Ok(s) = std::str::from_utf8(data) {
        let batch = decode(s, 5);
        let streamed: Result<Vec<_>, _> = items.into_iter().collect();
        assert_eq!(batch, streamed, "batch and streaming decode disagree");
    }
});
