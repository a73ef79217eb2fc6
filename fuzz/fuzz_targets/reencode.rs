#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: decode -> encode -> decode roundtrip.
//
// Anything the decoder accepts must encode and decode again to the same
// tree. Bytes are not compared: padding content is not preserved.
fuzz_target!(|data: &[u8]| {
    let Ok(item) = ttlv_wire::decode(data) else {
        return;
    };
    let bytes = ttlv_wire::encode(&item).expect("decoded item must encode");
    let again = ttlv_wire::decode(&bytes).expect("encoded item must decode");
    assert_eq!(again, item);
});
