use crate::error::DecompressionError;
use crate::stream::CompressedStream;

/// Number of command bits carried by one command byte.
const BITS_PER_COMMAND_BYTE: u8 = 8;

/// LSB-first reader over the command bytes interleaved in the stream.
///
/// A fresh command byte is pulled from the stream before the first bit and
/// after every eighth bit, at whatever position the stream has reached by
/// then. Literal and match payloads sit between command bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandBits {
    command_byte: u8,
    bits_consumed: u8,
}

impl Default for CommandBits {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBits {
    pub const fn new() -> Self {
        Self {
            command_byte: 0,
            bits_consumed: BITS_PER_COMMAND_BYTE,
        }
    }

    /// Returns the next command bit: `true` for a literal, `false` for a match.
    pub fn next_bit(
        &mut self,
        stream: &mut CompressedStream<'_>,
    ) -> Result<bool, DecompressionError> {
        if self.bits_consumed == BITS_PER_COMMAND_BYTE {
            let position = stream.position();
            self.command_byte = stream
                .read_u8()
                .ok_or(DecompressionError::TruncatedCommandByte { position })?;
            self.bits_consumed = 0;
        }

        let bit = self.command_byte & 1 != 0;
        self.command_byte >>= 1;
        self.bits_consumed += 1;
        Ok(bit)
    }
}
