#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full decoder entry point plus diagnostics rendering.
//
// Decodes arbitrary bytes and, on failure, renders the full diagnostic.
// Catches bugs in:
// - Header validation (tag range, type byte, fixed lengths)
// - Structure recursion and the depth limit
// - Padding and trailing-byte handling
// - Context rendering and path building on deep failures
fuzz_target!(|data: &[u8]| {
    if let Err(err) = ttlv_wire::decode(data) {
        let _ = ttlv_errors::details(Some(&err));
        let _ = err.result_reason();
    }
});
