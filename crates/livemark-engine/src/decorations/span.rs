use crate::widgets::Widget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Hide the source and paint a widget instead.
    Replace,
    /// Keep the source visible with a style attached.
    Mark,
}

/// Styles attached by MARK spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Heading text, level 1-6.
    Heading(u8),
    BlockQuote,
    /// The bullet prefix of a list item.
    ListItem,
    InlineCode,
    Strong,
    Emphasis,
    Strikethrough,
}

impl Mark {
    pub fn class(self) -> String {
        match self {
            Mark::Heading(level) => format!("cm-heading cm-heading-{level}"),
            Mark::BlockQuote => "cm-blockquote".to_string(),
            Mark::ListItem => "cm-list-item".to_string(),
            Mark::InlineCode => "cm-inline-code".to_string(),
            Mark::Strong => "cm-bold".to_string(),
            Mark::Emphasis => "cm-italic".to_string(),
            Mark::Strikethrough => "cm-strikethrough".to_string(),
        }
    }

    /// Inline CSS for hosts without a stylesheet.
    pub fn style(self) -> &'static str {
        match self {
            Mark::Heading(1) => "font-size: 1.8em; font-weight: 700; margin: 0.5em 0 0.25em 0;",
            Mark::Heading(2) => "font-size: 1.6em; font-weight: 700; margin: 0.4em 0 0.2em 0;",
            Mark::Heading(3) => "font-size: 1.4em; font-weight: 700; margin: 0.3em 0 0.15em 0;",
            Mark::Heading(4) => "font-size: 1.2em; font-weight: 700; margin: 0.2em 0 0.1em 0;",
            Mark::Heading(5) => "font-size: 1.1em; font-weight: 700; margin: 0.1em 0;",
            Mark::Heading(_) => "font-size: 1em; font-weight: 700; margin: 0.1em 0;",
            Mark::BlockQuote => {
                "border-left: 4px solid var(--color-accent); padding-left: 1em; color: var(--color-text-muted); font-style: italic;"
            }
            Mark::ListItem => "list-style: none;",
            Mark::InlineCode => {
                "background: var(--color-code-bg); padding: 0.2em 0.4em; border-radius: 3px; font-family: monospace; font-size: 0.9em;"
            }
            Mark::Strong => "font-weight: 700;",
            Mark::Emphasis => "font-style: italic;",
            Mark::Strikethrough => "text-decoration: line-through;",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Replace(Widget),
    Mark(Mark),
}

/// One annotation over `[from, to)` in document byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpan {
    pub from: usize,
    pub to: usize,
    pub payload: Payload,
}

impl AnnotationSpan {
    pub fn replace(from: usize, to: usize, widget: Widget) -> Self {
        Self {
            from,
            to,
            payload: Payload::Replace(widget),
        }
    }

    pub fn mark(from: usize, to: usize, mark: Mark) -> Self {
        Self {
            from,
            to,
            payload: Payload::Mark(mark),
        }
    }

    /// A REPLACE span hiding `markup`.
    pub fn hidden(from: usize, to: usize, markup: &str) -> Self {
        Self::replace(
            from,
            to,
            Widget::HiddenMarkup {
                markup: markup.to_string(),
            },
        )
    }

    pub fn kind(&self) -> SpanKind {
        match self.payload {
            Payload::Replace(_) => SpanKind::Replace,
            Payload::Mark(_) => SpanKind::Mark,
        }
    }

    pub fn widget(&self) -> Option<&Widget> {
        match &self.payload {
            Payload::Replace(w) => Some(w),
            Payload::Mark(_) => None,
        }
    }

    /// Non-inverted and inside a document of `len` bytes.
    pub fn is_valid(&self, len: usize) -> bool {
        self.from <= self.to && self.to <= len
    }

    /// Half-open overlap test.
    pub fn overlaps(&self, other: &AnnotationSpan) -> bool {
        self.from < other.to && other.from < self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_checks_bounds_and_order() {
        assert!(AnnotationSpan::mark(0, 3, Mark::Strong).is_valid(3));
        assert!(AnnotationSpan::mark(3, 3, Mark::Strong).is_valid(3));
        assert!(!AnnotationSpan::mark(2, 4, Mark::Strong).is_valid(3));
        assert!(!AnnotationSpan::mark(2, 1, Mark::Strong).is_valid(3));
    }

    #[test]
    fn adjacent_spans_do_not_overlap() {
        let a = AnnotationSpan::hidden(0, 2, "**");
        let b = AnnotationSpan::mark(2, 6, Mark::Strong);
        let c = AnnotationSpan::hidden(1, 3, "**");
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert_eq!(a.kind(), SpanKind::Replace);
        assert_eq!(b.kind(), SpanKind::Mark);
        assert!(b.widget().is_none());
    }

    #[test]
    fn heading_styles_are_distinct_per_level() {
        let styles: Vec<_> = (1..=6).map(|l| Mark::Heading(l).style()).collect();
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Mark::Heading(2).class(), "cm-heading cm-heading-2");
    }
}
