use crate::error::DecompressionError;
use crate::stream::CompressedStream;

/// Size of the block header in bytes: control byte + 16-bit output size.
pub const HEADER_LEN: usize = 3;

/// Control byte flag allowing a length-extension byte after long matches.
const EXTENDED_LENGTH_FLAG: u8 = 0x80;

/// Control byte bits holding the base match length.
const BASE_LENGTH_MASK: u8 = 0x7F;

/// Parameters read from the 3-byte block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Control byte exactly as stored.
    pub raw_control: u8,
    /// Added to every match's length nibble.
    pub base_length: u8,
    pub extended_length: bool,
    /// Number of bytes the block decodes to.
    pub expected_size: u16,
}

impl Header {
    /// Reads the header at `offset` without consuming anything.
    pub fn parse(input: &[u8], offset: usize) -> Result<Self, DecompressionError> {
        read_header(&mut CompressedStream::new(input, offset))
    }

    /// Splits a control byte into base length and extended-length flag.
    pub const fn from_parts(raw_control: u8, expected_size: u16) -> Self {
        Self {
            raw_control,
            base_length: raw_control & BASE_LENGTH_MASK,
            extended_length: raw_control & EXTENDED_LENGTH_FLAG != 0,
            expected_size,
        }
    }
}

/// Reads the header and advances the stream past it.
pub(crate) fn read_header(stream: &mut CompressedStream<'_>) -> Result<Header, DecompressionError> {
    if stream.remaining() < HEADER_LEN {
        return Err(DecompressionError::TruncatedHeader {
            position: stream.position(),
        });
    }

    let position = stream.position();
    let truncated = DecompressionError::TruncatedHeader { position };
    let control = stream.read_u8().ok_or(truncated)?;
    let expected_size = stream.read_u16_le().ok_or(truncated)?;

    Ok(Header::from_parts(control, expected_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_control_byte() {
        let header = Header::parse(&[0x03, 0x00, 0x10], 0).unwrap();
        assert_eq!(header.raw_control, 0x03);
        assert_eq!(header.base_length, 3);
        assert!(!header.extended_length);
        assert_eq!(header.expected_size, 0x1000);
    }

    #[test]
    fn test_extended_flag_is_stripped() {
        let header = Header::parse(&[0x00, 0x82, 0x34, 0x12], 1).unwrap();
        assert_eq!(header.raw_control, 0x82);
        assert_eq!(header.base_length, 2);
        assert!(header.extended_length);
        assert_eq!(header.expected_size, 0x1234);
    }

    #[test]
    fn test_stream_advances_by_header_len() {
        let data = [0x01, 0x00, 0x01, 0xAA];
        let mut stream = CompressedStream::new(&data, 0);
        read_header(&mut stream).unwrap();
        assert_eq!(stream.position(), HEADER_LEN);
    }

    #[test]
    fn test_truncated_header() {
        assert_eq!(
            Header::parse(&[0x01, 0x00], 0),
            Err(DecompressionError::TruncatedHeader { position: 0 })
        );
        assert_eq!(
            Header::parse(&[], 5),
            Err(DecompressionError::TruncatedHeader { position: 5 })
        );
    }

    #[test]
    fn test_parse_is_repeatable() {
        let data = [0x00, 0x81, 0x00, 0x02];
        assert_eq!(Header::parse(&data, 1), Header::parse(&data, 1));
    }
}
