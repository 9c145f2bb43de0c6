use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 0-based line index.
    pub index: usize,
    /// Byte span of the line content, excluding its terminator.
    pub span: Span,
    /// Length of the stripped terminator: 0 (last line), 1 (`\n`) or 2 (`\r\n`).
    pub terminator: usize,
    /// The line content without terminator.
    pub text: String,
}

impl LineRef {
    /// Offset where the following line starts.
    pub fn next_start(&self) -> usize {
        self.span.end + self.terminator
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Built on `lines_raw` so the terminator length is known exactly and offsets
/// stay in sync with the rope. A trailing newline does not produce an extra
/// empty line.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(index, raw)| {
        let start = offset;
        offset += raw.len();

        let content: &str = match raw.strip_suffix('\n') {
            Some(line) => line.strip_suffix('\r').unwrap_or(line),
            None => raw.as_ref(),
        };
        let terminator = raw.len() - content.len();

        LineRef {
            index,
            span: Span::new(start, start + content.len()),
            terminator,
            text: content.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<(usize, Span, usize, String)> {
        let rope = Rope::from(text);
        lines_with_spans(&rope)
            .map(|l| (l.index, l.span, l.terminator, l.text))
            .collect()
    }

    #[test]
    fn empty_rope_has_no_lines() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn splits_on_newlines_with_offsets() {
        let lines = collect("# Hi\nbody\nend");
        assert_eq!(
            lines,
            vec![
                (0, Span::new(0, 4), 1, "# Hi".to_string()),
                (1, Span::new(5, 9), 1, "body".to_string()),
                (2, Span::new(10, 13), 0, "end".to_string()),
            ]
        );
    }

    #[test]
    fn strips_crlf_terminators() {
        let lines = collect("a\r\nb");
        assert_eq!(lines[0], (0, Span::new(0, 1), 2, "a".to_string()));
        assert_eq!(lines[1], (1, Span::new(3, 4), 0, "b".to_string()));
    }

    #[test]
    fn trailing_newline_adds_no_line() {
        let lines = collect("only\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].2, 1);
    }

    #[test]
    fn blank_lines_are_kept() {
        let lines = collect("a\n\nb");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], (1, Span::new(2, 2), 1, String::new()));
    }

    #[test]
    fn next_start_skips_terminator() {
        let rope = Rope::from("ab\r\ncd");
        let first = lines_with_spans(&rope).next().unwrap();
        assert_eq!(first.next_start(), 4);
    }
}
