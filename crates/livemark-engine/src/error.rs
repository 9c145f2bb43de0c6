use thiserror::Error;

/// Failure while decorating a single line.
///
/// The builder drops the offending line's output and keeps going; these never
/// reach the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecorateError {
    #[error("offset {at} is not a character boundary in a line of {len} bytes")]
    InvalidBoundary { at: usize, len: usize },

    #[error("inverted range {start}..{end}")]
    InvertedRange { start: usize, end: usize },
}

/// Failure of a whole recomputation pass or of a state lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("offset {offset} is outside the document (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("offset {offset} does not fall on a character boundary")]
    NotCharBoundary { offset: usize },

    #[error("line {line} does not exist (document has {count} lines)")]
    LineOutOfRange { line: usize, count: usize },

    #[error("line walk reached offset {walked} but the document is {len} bytes long")]
    SnapshotMismatch { walked: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown display mode '{value}' (expected source, live-preview or reading)")]
pub struct ParseModeError {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme '{value}' (expected light or dark)")]
pub struct ParseThemeError {
    pub value: String,
}
