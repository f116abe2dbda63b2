#![no_main]

use evo_lzss::{Mode, Outcome, decompress};
use libfuzzer_sys::fuzz_target;

/// Decodes arbitrary bytes from a fuzzer-chosen start offset and mode.
///
/// # Invariant
/// Decoding never panics, never writes more than the header's size and never
/// reports reading past the end of the input. A `Complete` outcome always
/// means exactly the declared size was produced.
fn verify_decompression_robustness(data: &[u8]) {
    let Some((&selector, rom)) = data.split_first() else {
        return;
    };
    let mode = match selector % 3 {
        0 => Mode::Standard,
        1 => Mode::Alternate,
        _ => Mode::Auto,
    };
    let start = usize::from(selector >> 2) % (rom.len() + 1);

    let out = decompress(rom, start, mode);
    let expected = out.expected_size().unwrap_or(0);

    assert!(out.data.len() <= expected);
    assert!(out.input_end <= rom.len().max(start));
    if out.outcome == Outcome::Complete {
        assert_eq!(out.data.len(), expected);
    }
}

fuzz_target!(|data: &[u8]| {
    verify_decompression_robustness(data);
});
