//! Best-effort guess at whether a block uses the special (counter-limited) mode.
//!
//! Nothing in the header actually marks special-mode blocks. The rule below
//! matches the samples seen so far and is wrong for some blocks, so callers
//! that know the mode should force it with [`Mode::Standard`] or
//! [`Mode::Alternate`].

use crate::header::Header;

/// How the decoder chooses between standard and special mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Standard,
    /// Special mode: stop after [`SPECIAL_COUNTER_START`](crate::SPECIAL_COUNTER_START) commands.
    Alternate,
    /// Guess from the header with [`detect_mode`].
    #[default]
    Auto,
}

impl Mode {
    /// Resolves the mode for a parsed header. Forced modes are returned as is.
    pub fn is_alternate(self, header: &Header) -> bool {
        match self {
            Self::Standard => false,
            Self::Alternate => true,
            Self::Auto => detect_mode(header),
        }
    }
}

/// Guesses special mode for a control byte of exactly 1 and an output size
/// that is a multiple of 256.
pub const fn detect_mode(header: &Header) -> bool {
    header.raw_control == 0x01 && header.expected_size % 0x100 == 0
}

/// Reads the header at `offset` and guesses its mode.
///
/// Returns `None` when the header does not fit in `input`.
pub fn probe(input: &[u8], offset: usize) -> Option<(Header, bool)> {
    let header = Header::parse(input, offset).ok()?;
    Some((header, detect_mode(&header)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_special() {
        assert!(detect_mode(&Header::from_parts(0x01, 0x0800)));
        assert!(detect_mode(&Header::from_parts(0x01, 0)));
    }

    #[test]
    fn test_detect_standard() {
        assert!(!detect_mode(&Header::from_parts(0x01, 0x0801)));
        assert!(!detect_mode(&Header::from_parts(0x02, 0x0800)));
        // Extended flag set means the raw byte is no longer 1.
        assert!(!detect_mode(&Header::from_parts(0x81, 0x0800)));
    }

    #[test]
    fn test_forced_mode_wins() {
        let special_looking = Header::from_parts(0x01, 0x1000);
        assert!(!Mode::Standard.is_alternate(&special_looking));
        assert!(Mode::Auto.is_alternate(&special_looking));

        let plain = Header::from_parts(0x03, 0x1234);
        assert!(Mode::Alternate.is_alternate(&plain));
        assert!(!Mode::Auto.is_alternate(&plain));
    }

    #[test]
    fn test_probe() {
        let data = [0xEE, 0x01, 0x00, 0x02];
        let (header, special) = probe(&data, 1).unwrap();
        assert_eq!(header.expected_size, 0x0200);
        assert!(special);

        assert_eq!(probe(&data, 2), None);
    }
}
