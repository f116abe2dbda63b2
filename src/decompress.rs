use alloc::vec::Vec;

use crate::bitstream::CommandBits;
use crate::detect::Mode;
use crate::error::{DecompressionError, Diagnostic};
use crate::header::{Header, read_header};
use crate::stream::CompressedStream;
use crate::window::Window;

type Result<T> = core::result::Result<T, DecompressionError>;

// --- Constants ---

/// Hard ceiling on a single match's copy length.
pub const MAX_COPY_LEN: usize = 0x2000;

/// Commands a special-mode block may emit before decoding stops.
pub const SPECIAL_COUNTER_START: u16 = 0x100;

/// Match word bits holding `offset - 1`.
pub const OFFSET_MASK: u16 = 0x0FFF;

/// Length nibble value that pulls in an extension byte when the header allows it.
pub const EXTENDED_LENGTH_NIBBLE: usize = 0x0F;

/// Shift of the length nibble within the match word.
const LENGTH_SHIFT: u32 = 12;

/// How a decode call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The output reached the size given in the header.
    Complete,
    /// Special mode used up its command budget first. Short output is normal here.
    CounterExhausted,
    /// The input ran out before the output was full.
    InputExhausted,
    /// A fatal error stopped the decoder; the output holds what came before it.
    Aborted(DecompressionError),
}

/// Result of decoding one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    pub data: Vec<u8>,
    /// `None` only when the header itself was truncated.
    pub header: Option<Header>,
    /// Whether the block was decoded in special mode.
    pub alternate: bool,
    pub outcome: Outcome,
    /// Recoverable problems, in stream order.
    pub diagnostics: Vec<Diagnostic>,
    /// Input position just past the last byte read.
    pub input_end: usize,
}

impl Decompressed {
    pub const fn is_complete(&self) -> bool {
        matches!(self.outcome, Outcome::Complete)
    }

    pub const fn error(&self) -> Option<DecompressionError> {
        match self.outcome {
            Outcome::Aborted(err) => Some(err),
            _ => None,
        }
    }

    pub fn expected_size(&self) -> Option<usize> {
        self.header.map(|h| usize::from(h.expected_size))
    }

    /// Strict view: the data only if the block decoded in full.
    pub fn into_result(self) -> Result<Vec<u8>> {
        match self.outcome {
            Outcome::Complete => Ok(self.data),
            Outcome::Aborted(err) => Err(err),
            Outcome::CounterExhausted | Outcome::InputExhausted => {
                Err(DecompressionError::Incomplete {
                    produced: self.data.len(),
                    expected: self.expected_size().unwrap_or_default(),
                })
            }
        }
    }
}

/// Per-call mutable decoder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderState {
    pub commands: CommandBits,
    /// Remaining command budget; `None` outside special mode.
    pub special_counter: Option<u16>,
}

impl DecoderState {
    pub const fn new(alternate: bool) -> Self {
        Self {
            commands: CommandBits::new(),
            special_counter: if alternate {
                Some(SPECIAL_COUNTER_START)
            } else {
                None
            },
        }
    }

    const fn counter_exhausted(&self) -> bool {
        matches!(self.special_counter, Some(0))
    }

    /// Charges one emitted command against the special-mode budget.
    fn charge_command(&mut self) {
        if let Some(counter) = self.special_counter.as_mut() {
            *counter = counter.saturating_sub(1);
        }
    }
}

/// Decodes the compressed block starting at `offset` in `input`.
///
/// Never fails outright: fatal errors are reported through
/// [`Outcome::Aborted`] alongside whatever output was produced before them.
///
/// ```rust
/// use evo_lzss::{Mode, decompress};
///
/// // Size 4, two literals, then a match copying them once more.
/// let block = [0x00, 0x04, 0x00, 0b0000_0011, b'A', b'B', 0x01, 0x20];
/// let out = decompress(&block, 0, Mode::Standard);
/// assert!(out.is_complete());
/// assert_eq!(out.data, b"ABAB");
/// ```
pub fn decompress(input: &[u8], offset: usize, mode: Mode) -> Decompressed {
    let mut stream = CompressedStream::new(input, offset);

    let header = match read_header(&mut stream) {
        Ok(header) => header,
        Err(err) => {
            log::error!(target: "lzss", "{err}");
            return Decompressed {
                data: Vec::new(),
                header: None,
                alternate: mode == Mode::Alternate,
                outcome: Outcome::Aborted(err),
                diagnostics: Vec::new(),
                input_end: stream.position(),
            };
        }
    };

    let alternate = mode.is_alternate(&header);
    log::debug!(
        target: "lzss",
        "block at {offset:#x}: base length {}, extended {}, size {}, {} mode",
        header.base_length,
        header.extended_length,
        header.expected_size,
        if alternate { "special" } else { "standard" },
    );

    let mut decoder = Decoder {
        stream,
        window: Window::with_capacity(usize::from(header.expected_size)),
        header,
        state: DecoderState::new(alternate),
        diagnostics: Vec::new(),
    };

    let outcome = match decoder.run() {
        Ok(outcome) => outcome,
        Err(err) => {
            log::error!(target: "lzss", "{err}");
            Outcome::Aborted(err)
        }
    };

    let expected = usize::from(header.expected_size);
    match outcome {
        Outcome::CounterExhausted => log::info!(
            target: "lzss",
            "special mode counter reached 0, stopped at {} of {expected} bytes",
            decoder.window.len(),
        ),
        Outcome::InputExhausted => log::info!(
            target: "lzss",
            "input exhausted, decoded {} of {expected} bytes",
            decoder.window.len(),
        ),
        _ => {}
    }

    Decompressed {
        input_end: decoder.stream.position(),
        data: decoder.window.into_vec(),
        header: Some(header),
        alternate,
        outcome,
        diagnostics: decoder.diagnostics,
    }
}

struct Decoder<'a> {
    stream: CompressedStream<'a>,
    window: Window,
    header: Header,
    state: DecoderState,
    diagnostics: Vec<Diagnostic>,
}

impl Decoder<'_> {
    fn expected_size(&self) -> usize {
        usize::from(self.header.expected_size)
    }

    fn run(&mut self) -> Result<Outcome> {
        while self.window.len() < self.expected_size() && self.stream.has_remaining() {
            if self.state.counter_exhausted() {
                return Ok(Outcome::CounterExhausted);
            }

            if self.state.commands.next_bit(&mut self.stream)? {
                self.literal()?;
            } else {
                self.back_reference()?;
            }
        }

        Ok(if self.window.len() >= self.expected_size() {
            Outcome::Complete
        } else if self.state.counter_exhausted() {
            Outcome::CounterExhausted
        } else {
            Outcome::InputExhausted
        })
    }

    fn literal(&mut self) -> Result<()> {
        let position = self.stream.position();
        let byte = self
            .stream
            .read_u8()
            .ok_or(DecompressionError::TruncatedLiteral { position })?;
        self.window.push(byte);
        self.state.charge_command();
        Ok(())
    }

    fn back_reference(&mut self) -> Result<()> {
        let position = self.stream.position();
        let match_info = self
            .stream
            .read_u16_le()
            .ok_or(DecompressionError::TruncatedMatchInfo { position })?;

        let offset = usize::from(match_info & OFFSET_MASK) + 1;
        let length_field = usize::from(match_info >> LENGTH_SHIFT);
        let mut length = length_field + usize::from(self.header.base_length);

        if length_field == EXTENDED_LENGTH_NIBBLE && self.header.extended_length {
            let extra_position = self.stream.position();
            let extra = self
                .stream
                .read_u8()
                .ok_or(DecompressionError::TruncatedExtraLength {
                    position: extra_position,
                })?;
            length += usize::from(extra);
        }

        if offset > self.window.len() {
            self.report(Diagnostic::InvalidBackreferenceOffset {
                position,
                offset,
                available: self.window.len(),
            });
            return Ok(());
        }

        let room = self.expected_size().saturating_sub(self.window.len());
        let length = clamp_copy_length(length, room, position, &mut |d| self.report(d));

        if self.window.is_empty() {
            return Err(DecompressionError::EmptyBufferCopy { position });
        }

        self.window
            .copy_match(offset, length)
            .map_err(|_| DecompressionError::EmptyBufferCopy { position })?;
        self.state.charge_command();
        Ok(())
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!(target: "lzss", "{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// Applies the [`MAX_COPY_LEN`] ceiling, then limits the copy to `room`
/// bytes, reporting each clamp that changes the value.
fn clamp_copy_length(
    requested: usize,
    room: usize,
    position: usize,
    report: &mut impl FnMut(Diagnostic),
) -> usize {
    let mut length = requested;

    if length > MAX_COPY_LEN {
        report(Diagnostic::ExcessiveCopyLength {
            position,
            requested: length,
            clamped: MAX_COPY_LEN,
        });
        length = MAX_COPY_LEN;
    }

    if length > room {
        report(Diagnostic::OutputSizeOverrun {
            position,
            requested: length,
            clamped: room,
        });
        length = room;
    }

    length
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn clamp(requested: usize, room: usize) -> (usize, Vec<Diagnostic>) {
        let mut seen = Vec::new();
        let length = clamp_copy_length(requested, room, 7, &mut |d| seen.push(d));
        (length, seen)
    }

    #[test]
    fn test_clamp_within_limits() {
        assert_eq!(clamp(18, 100), (18, vec![]));
        assert_eq!(clamp(0, 0), (0, vec![]));
    }

    #[test]
    fn test_clamp_to_ceiling() {
        let (length, seen) = clamp(MAX_COPY_LEN + 5, usize::MAX);
        assert_eq!(length, MAX_COPY_LEN);
        assert_eq!(
            seen,
            vec![Diagnostic::ExcessiveCopyLength {
                position: 7,
                requested: MAX_COPY_LEN + 5,
                clamped: MAX_COPY_LEN,
            }]
        );
    }

    #[test]
    fn test_clamp_ceiling_then_room() {
        let (length, seen) = clamp(0x3000, 0x100);
        assert_eq!(length, 0x100);
        assert_eq!(
            seen,
            vec![
                Diagnostic::ExcessiveCopyLength {
                    position: 7,
                    requested: 0x3000,
                    clamped: MAX_COPY_LEN,
                },
                Diagnostic::OutputSizeOverrun {
                    position: 7,
                    requested: MAX_COPY_LEN,
                    clamped: 0x100,
                },
            ]
        );
    }

    #[test]
    fn test_counter_charging() {
        let mut state = DecoderState::new(true);
        assert_eq!(state.special_counter, Some(SPECIAL_COUNTER_START));
        for _ in 0..SPECIAL_COUNTER_START {
            assert!(!state.counter_exhausted());
            state.charge_command();
        }
        assert!(state.counter_exhausted());
        state.charge_command();
        assert_eq!(state.special_counter, Some(0));

        let mut standard = DecoderState::new(false);
        standard.charge_command();
        assert_eq!(standard.special_counter, None);
        assert!(!standard.counter_exhausted());
    }

    #[test]
    fn test_header_only_block() {
        let out = decompress(&[0x00, 0x00, 0x00], 0, Mode::Standard);
        assert_eq!(out.outcome, Outcome::Complete);
        assert!(out.data.is_empty());
        assert_eq!(out.input_end, 3);
    }
}
