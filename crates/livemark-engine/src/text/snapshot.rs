use xi_rope::Rope;

use crate::error::EngineError;

use super::lines::{LineRef, lines_with_spans};

/// Immutable view of the document for one recomputation pass.
///
/// Borrows the host's rope; it is never retained past the pass that created
/// it and the engine never writes through it.
#[derive(Clone, Copy)]
pub struct DocumentSnapshot<'a> {
    rope: &'a Rope,
}

impl<'a> DocumentSnapshot<'a> {
    pub fn new(rope: &'a Rope) -> Self {
        Self { rope }
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of lines; an empty document has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.rope.line_of_offset(self.rope.len()) + 1
    }

    /// Lines in document order, terminators stripped.
    pub fn lines(&self) -> impl Iterator<Item = LineRef> + 'a {
        lines_with_spans(self.rope)
    }

    /// The line with the given 0-based index, if it has any content or terminator.
    pub fn line(&self, index: usize) -> Option<LineRef> {
        self.lines().nth(index)
    }

    /// Converts an absolute offset to a 0-based line index.
    pub fn line_of_offset(&self, offset: usize) -> Result<usize, EngineError> {
        let len = self.len();
        if offset > len {
            return Err(EngineError::OffsetOutOfRange { offset, len });
        }
        Ok(self.rope.line_of_offset(offset))
    }

    /// Converts a 0-based line index to the offset where that line starts.
    pub fn offset_of_line(&self, line: usize) -> Result<usize, EngineError> {
        let count = self.line_count();
        if line >= count {
            return Err(EngineError::LineOutOfRange { line, count });
        }
        Ok(self.rope.offset_of_line(line))
    }
}
