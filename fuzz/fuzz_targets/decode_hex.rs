#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: hex text parsing.
//
// Arbitrary UTF-8 goes through `decode_hex`; whatever parses is fed to
// the decoder.
fuzz_target!(|text: &str| {
    if let Ok(bytes) = ttlv_wire::decode_hex(text) {
        let _ = ttlv_wire::decode(&bytes);
    }
});
