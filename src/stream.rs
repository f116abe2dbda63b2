/// Read cursor over the compressed input.
///
/// The position only moves forward. Every read is bounds-checked and returns
/// `None` once the input runs out, leaving the cursor where it was.
#[derive(Debug, Clone)]
pub struct CompressedStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> CompressedStream<'a> {
    /// Starts reading `data` at `pos`. A start past the end is allowed and
    /// simply yields an exhausted stream.
    pub const fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    #[inline]
    pub const fn has_remaining(&self) -> bool {
        self.pos < self.data.len()
    }

    #[inline]
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    #[inline]
    pub fn read_u16_le(&mut self) -> Option<u16> {
        if self.remaining() < 2 {
            return None;
        }
        let word = u16::from_le_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Some(word)
    }
}
