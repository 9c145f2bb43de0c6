use crate::{
    error::EngineError,
    mode::DisplayMode,
    text::{DocumentSnapshot, LineRef},
};

use super::{
    line::{LineDecorator, MarkdownLineDecorator},
    span::AnnotationSpan,
};

/// Builds the full annotation set for one snapshot.
///
/// Walks every line with a running offset, skips the cursor's line in
/// live-preview, drops out-of-bounds spans and sorts the rest by `from`.
pub struct DecorationBuilder<D = MarkdownLineDecorator> {
    decorator: D,
}

impl DecorationBuilder {
    pub fn new() -> Self {
        Self {
            decorator: MarkdownLineDecorator,
        }
    }
}

impl Default for DecorationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: LineDecorator> DecorationBuilder<D> {
    pub fn with_decorator(decorator: D) -> Self {
        Self { decorator }
    }

    /// One pass over `snapshot`. Per-line failures are logged and skipped;
    /// only a pass-level inconsistency is an `Err`.
    pub fn build(
        &self,
        snapshot: DocumentSnapshot<'_>,
        cursor_line: Option<usize>,
        mode: DisplayMode,
    ) -> Result<Vec<AnnotationSpan>, EngineError> {
        if !mode.decorates() {
            return Ok(vec![]);
        }
        self.collect(snapshot.lines(), snapshot.len(), cursor_line, mode)
    }

    /// Like [`build`](Self::build), but a failed pass yields an empty set so
    /// the host falls back to raw text.
    pub fn recompute(
        &self,
        snapshot: DocumentSnapshot<'_>,
        cursor_line: Option<usize>,
        mode: DisplayMode,
    ) -> Vec<AnnotationSpan> {
        or_empty(self.build(snapshot, cursor_line, mode))
    }

    fn collect(
        &self,
        lines: impl Iterator<Item = LineRef>,
        len: usize,
        cursor_line: Option<usize>,
        mode: DisplayMode,
    ) -> Result<Vec<AnnotationSpan>, EngineError> {
        let mut offset = 0usize;
        let mut spans = vec![];

        for line in lines {
            if line.span.start != offset {
                return Err(EngineError::SnapshotMismatch {
                    walked: offset,
                    len,
                });
            }
            offset = line.next_start();

            if mode == DisplayMode::LivePreview && cursor_line == Some(line.index) {
                log::trace!("leaving cursor line {} raw", line.index);
                continue;
            }

            match self.decorator.decorate(&line.text, line.span.start) {
                Ok(line_spans) => {
                    for span in line_spans {
                        if span.is_valid(len) {
                            spans.push(span);
                        } else {
                            log::debug!(
                                "dropping invalid span {}..{} on line {} (document length {len})",
                                span.from,
                                span.to,
                                line.index
                            );
                        }
                    }
                }
                Err(e) => log::warn!("skipping decorations for line {}: {e}", line.index),
            }
        }

        if offset != len {
            return Err(EngineError::SnapshotMismatch {
                walked: offset,
                len,
            });
        }

        spans.sort_by_key(|s| s.from);
        Ok(spans)
    }
}

fn or_empty(result: Result<Vec<AnnotationSpan>, EngineError>) -> Vec<AnnotationSpan> {
    result.unwrap_or_else(|e| {
        log::warn!("decoration pass failed, showing raw text: {e}");
        Vec::new()
    })
}

/// `recompute(snapshot, cursorLine, mode) -> spans` with the markdown rules.
pub fn recompute(
    snapshot: DocumentSnapshot<'_>,
    cursor_line: Option<usize>,
    mode: DisplayMode,
) -> Vec<AnnotationSpan> {
    DecorationBuilder::new().recompute(snapshot, cursor_line, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decorations::span::Mark,
        error::DecorateError,
        tests::invariants,
        text::Span,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use xi_rope::Rope;

    const DOC: &str = "# Title\n**bold**\n- [ ] task";

    fn run(text: &str, cursor_line: Option<usize>, mode: DisplayMode) -> Vec<AnnotationSpan> {
        let rope = Rope::from(text);
        let spans = recompute(DocumentSnapshot::new(&rope), cursor_line, mode);
        invariants::check(text.len(), &spans);
        spans
    }

    fn lines_touched(text: &str, spans: &[AnnotationSpan]) -> Vec<usize> {
        let rope = Rope::from(text);
        let mut lines: Vec<usize> = spans
            .iter()
            .map(|s| rope.line_of_offset(s.from))
            .collect();
        lines.dedup();
        lines
    }

    #[rstest]
    #[case(None)]
    #[case(Some(0))]
    fn source_mode_is_empty(#[case] cursor_line: Option<usize>) {
        assert!(run(DOC, cursor_line, DisplayMode::Source).is_empty());
    }

    #[test]
    fn live_preview_skips_cursor_line() {
        let spans = run(DOC, Some(2), DisplayMode::LivePreview);
        assert_eq!(lines_touched(DOC, &spans), vec![0, 1]);
    }

    #[test]
    fn reading_decorates_cursor_line() {
        let spans = run(DOC, Some(2), DisplayMode::Reading);
        assert_eq!(lines_touched(DOC, &spans), vec![0, 1, 2]);
    }

    #[test]
    fn no_cursor_line_decorates_everything() {
        let spans = run(DOC, None, DisplayMode::LivePreview);
        assert_eq!(lines_touched(DOC, &spans), vec![0, 1, 2]);
    }

    #[test]
    fn crlf_offsets_account_for_terminators() {
        let spans = run("# A\r\n# B", None, DisplayMode::Reading);
        assert_eq!(
            spans,
            vec![
                AnnotationSpan::hidden(0, 2, "# "),
                AnnotationSpan::mark(2, 3, Mark::Heading(1)),
                AnnotationSpan::hidden(5, 7, "# "),
                AnnotationSpan::mark(7, 8, Mark::Heading(1)),
            ]
        );
    }

    #[test]
    fn recompute_is_idempotent() {
        let first = run(DOC, Some(1), DisplayMode::LivePreview);
        let second = run(DOC, Some(1), DisplayMode::LivePreview);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_document() {
        assert!(run("", None, DisplayMode::Reading).is_empty());
        assert!(run("\n\n", Some(1), DisplayMode::LivePreview).is_empty());
    }

    /// Fails on any line containing "boom", otherwise marks the whole line
    /// and emits one span past the end of the document.
    struct Flaky;

    impl LineDecorator for Flaky {
        fn decorate(
            &self,
            line: &str,
            start: usize,
        ) -> Result<Vec<AnnotationSpan>, DecorateError> {
            if line.contains("boom") {
                return Err(DecorateError::InvalidBoundary { at: 1, len: 0 });
            }
            Ok(vec![
                AnnotationSpan::mark(start, start + line.len(), Mark::Strong),
                AnnotationSpan::mark(start, usize::MAX, Mark::Emphasis),
                AnnotationSpan::mark(start + 1, start, Mark::Emphasis),
            ])
        }
    }

    #[test]
    fn failing_line_is_isolated_and_invalid_spans_dropped() {
        let text = "one\nboom\nthree";
        let rope = Rope::from(text);
        let builder = DecorationBuilder::with_decorator(Flaky);
        let spans = builder.recompute(DocumentSnapshot::new(&rope), None, DisplayMode::Reading);
        assert_eq!(
            spans,
            vec![
                AnnotationSpan::mark(0, 3, Mark::Strong),
                AnnotationSpan::mark(9, 14, Mark::Strong),
            ]
        );
    }

    fn line(index: usize, start: usize, text: &str, terminator: usize) -> LineRef {
        LineRef {
            index,
            span: Span::new(start, start + text.len()),
            terminator,
            text: text.to_string(),
        }
    }

    #[test]
    fn inconsistent_line_walk_yields_empty_set() {
        let builder = DecorationBuilder::new();
        // Second line claims to start after a gap.
        let lines = vec![line(0, 0, "# a", 1), line(1, 6, "# b", 0)];
        let result = builder.collect(lines.into_iter(), 9, None, DisplayMode::Reading);
        assert_eq!(
            result,
            Err(EngineError::SnapshotMismatch { walked: 4, len: 9 })
        );
        assert!(or_empty(result).is_empty());
    }

    #[test]
    fn short_line_walk_yields_empty_set() {
        let builder = DecorationBuilder::new();
        let lines = vec![line(0, 0, "# a", 0)];
        let result = builder.collect(lines.into_iter(), 10, None, DisplayMode::Reading);
        assert_eq!(
            result,
            Err(EngineError::SnapshotMismatch { walked: 3, len: 10 })
        );
    }
}
