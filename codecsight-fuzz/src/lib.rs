//! Fuzzing entry points for codecsight-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_dispatch

use codecsight_core::{decoders, BitList, Engine};

/// Dispatch arbitrary bytes as a codec list
pub fn fuzz_dispatch(data: &[u8]) {
    let Ok(engine) = Engine::with_defaults() else {
        return;
    };
    let input = String::from_utf8_lossy(data);

    // Should never panic, whatever the input
    let report = engine.dispatch(&input);
    let _ = report.render();
}

/// Read every bit and a few fields from arbitrary octets
pub fn fuzz_bits(data: &[u8]) {
    let bits = BitList::from_octets(data);
    for bit in 0..=bits.bit_len() + 8 {
        let _ = bits.bit_set(bit);
        let _ = bits.bit_set_legacy(bit);
        let _ = bits.value(bit, 5);
    }
    let _ = bits.to_bit_string();
}

/// Feed arbitrary `.`-separated tokens to the key and field tables
pub fn fuzz_keyvalue(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    let tokens: Vec<&str> = input.split('.').collect();

    let _ = decoders::evc::KEYS.parse(&tokens).report();
    let _ = decoders::lcevc::KEYS.parse(&tokens).report();
    let _ = decoders::av1::FIELDS.parse(&tokens).report();
    let _ = decoders::vp9::FIELDS.parse(&tokens).report();
}
