use thiserror::Error;

/// Conditions that stop the decoder.
///
/// `position` is the input offset at which the missing or bad data was
/// expected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressionError {
    #[error("Header truncated at {position:#x}")]
    TruncatedHeader { position: usize },

    #[error("Command byte missing at {position:#x}")]
    TruncatedCommandByte { position: usize },

    #[error("Literal byte missing at {position:#x}")]
    TruncatedLiteral { position: usize },

    #[error("Match word truncated at {position:#x}")]
    TruncatedMatchInfo { position: usize },

    #[error("Extended length byte missing at {position:#x}")]
    TruncatedExtraLength { position: usize },

    #[error("Back-reference into empty output at {position:#x}")]
    EmptyBufferCopy { position: usize },

    /// Only produced by [`Decompressed::into_result`](crate::Decompressed::into_result).
    #[error("Decoded {produced} of {expected} bytes")]
    Incomplete { produced: usize, expected: usize },
}

/// Conditions the decoder tolerates and works around.
///
/// `position` is the input offset of the match word that triggered it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// The match was skipped without producing output.
    #[error("Offset {offset} exceeds {available} decoded bytes at {position:#x}, match skipped")]
    InvalidBackreferenceOffset {
        position: usize,
        offset: usize,
        available: usize,
    },

    #[error("Copy length {requested} at {position:#x} clamped to {clamped}")]
    ExcessiveCopyLength {
        position: usize,
        requested: usize,
        clamped: usize,
    },

    #[error("Copy length {requested} at {position:#x} overruns output size, clamped to {clamped}")]
    OutputSizeOverrun {
        position: usize,
        requested: usize,
        clamped: usize,
    },
}

/// Returned by [`Window::copy_from_back`](crate::window::Window::copy_from_back)
/// when the offset reaches before the start of the output.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Lookback offset {offset} out of bounds for {len} bytes")]
pub struct WindowError {
    pub offset: usize,
    pub len: usize,
}
