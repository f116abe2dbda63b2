use alloc::vec::Vec;

use crate::error::WindowError;

/// Append-only output that doubles as the back-reference window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Window {
    buf: Vec<u8>,
}

impl Window {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Appends a copy of the byte `offset` positions behind the current end
    /// and returns it.
    ///
    /// The source index is taken from the length at the time of the call, so
    /// repeated calls with an offset shorter than the run replay the tail.
    #[inline]
    pub fn copy_from_back(&mut self, offset: usize) -> Result<u8, WindowError> {
        let len = self.buf.len();
        if offset == 0 || offset > len {
            return Err(WindowError { offset, len });
        }
        let byte = self.buf[len - offset];
        self.buf.push(byte);
        Ok(byte)
    }

    /// Copies `length` bytes starting `offset` behind the end, one at a time.
    pub fn copy_match(&mut self, offset: usize, length: usize) -> Result<(), WindowError> {
        self.buf.reserve(length);

        // RLE fast path
        if offset == 1 && length > 0 {
            let last = self.copy_from_back(1)?;
            self.buf.resize(self.buf.len() + length - 1, last);
            return Ok(());
        }

        for _ in 0..length {
            self.copy_from_back(offset)?;
        }
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}
