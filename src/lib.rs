//! # E.V.O. LZSS Decompression
//!
//! `evo_lzss` is a safe, pure-Rust decoder for the LZSS variant that packs
//! graphics and other assets in the *E.V.O.: Search for Eden* ROM.
//!
//! ## Format
//!
//! A block starts with a 3-byte header:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | +0 | 1 | control byte: bit 7 enables extended lengths, bits 0-6 are the base match length |
//! | +1 | 2 | decoded size, little endian |
//!
//! The rest is a command stream. Command bytes are read LSB first, one bit per
//! command, and a new command byte is read every eighth command. A `1` bit is
//! followed by one literal byte. A `0` bit is followed by a little-endian match
//! word: the low 12 bits hold `offset - 1`, the high nibble plus the base length
//! gives the copy length. With extended lengths enabled a nibble of `0xF` is
//! followed by one more byte that is added to the length.
//!
//! Some blocks use a *special* mode that stops after 256 commands regardless
//! of the header size. See [`Mode`].
//!
//! ## Example
//!
//! ```rust
//! use evo_lzss::{Mode, Outcome, decompress};
//!
//! // Header: base length 0, size 6.
//! // Command byte 0b0000_0111: three literals, then a match.
//! // Match word 0x3002: offset 3, length 3.
//! let rom = [
//!     0x00, 0x06, 0x00,
//!     0x07,
//!     b'a', b'b', b'c',
//!     0x02, 0x30,
//! ];
//!
//! let out = decompress(&rom, 0, Mode::Standard);
//! assert_eq!(out.outcome, Outcome::Complete);
//! assert_eq!(out.data, b"abcabc");
//! assert!(out.diagnostics.is_empty());
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod bitstream;
pub mod decompress;
pub mod detect;
pub mod error;
pub mod header;
pub mod stream;
pub mod window;

pub use decompress::{
    DecoderState, Decompressed, EXTENDED_LENGTH_NIBBLE, MAX_COPY_LEN, OFFSET_MASK, Outcome,
    SPECIAL_COUNTER_START, decompress,
};
pub use detect::{Mode, detect_mode, probe};
pub use error::{DecompressionError, Diagnostic, WindowError};
pub use header::{HEADER_LEN, Header};

#[cfg(test)]
mod tests {
    use super::{Mode, Outcome, decompress};

    #[test]
    fn test_start_offset_into_image() {
        let mut rom = alloc::vec![0xFFu8; 0x10];
        rom.extend_from_slice(&[0x00, 0x02, 0x00, 0x03, b'o', b'k', 0xEE]);

        let out = decompress(&rom, 0x10, Mode::Standard);
        assert_eq!(out.outcome, Outcome::Complete);
        assert_eq!(out.data, b"ok");
        assert_eq!(out.input_end, 0x16);
    }

    #[test]
    fn test_auto_mode_picks_special() {
        // Control byte 1 and a size that is a multiple of 256.
        let rom = [0x01, 0x00, 0x01, 0x01, b'x'];
        let out = decompress(&rom, 0, Mode::Auto);
        assert!(out.alternate);
        assert_eq!(out.outcome, Outcome::InputExhausted);
        assert_eq!(out.data, b"x");
    }
}
