//! Paints decorated text as ratatui lines.
//!
//! REPLACE spans become their widget's plain-text rendering; MARK spans
//! become styles, combined where several cover the same text.

use livemark_engine::{AnnotationSpan, CalloutKind, Mark, Payload, Theme, Widget};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub link: Color,
    pub code: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Magenta,
                link: Color::Cyan,
                code: Color::Yellow,
            },
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Magenta,
                link: Color::Blue,
                code: Color::Red,
            },
        }
    }

    fn mark(&self, mark: Mark) -> Style {
        let style = Style::default();
        match mark {
            Mark::Heading(1) => style
                .fg(self.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            Mark::Heading(_) => style.fg(self.accent).add_modifier(Modifier::BOLD),
            Mark::BlockQuote => style.fg(self.muted).add_modifier(Modifier::ITALIC),
            Mark::ListItem => style.fg(self.accent),
            Mark::InlineCode => style.fg(self.code),
            Mark::Strong => style.add_modifier(Modifier::BOLD),
            Mark::Emphasis => style.add_modifier(Modifier::ITALIC),
            Mark::Strikethrough => style.add_modifier(Modifier::CROSSED_OUT),
        }
    }

    fn widget(&self, widget: &Widget) -> Style {
        let style = Style::default();
        match widget {
            Widget::HiddenMarkup { .. } => style,
            Widget::Link { .. } | Widget::WikiLink { .. } => {
                style.fg(self.link).add_modifier(Modifier::UNDERLINED)
            }
            Widget::Image { .. } => style.fg(self.accent),
            Widget::Task { checked: true, .. } => {
                style.fg(self.muted).add_modifier(Modifier::CROSSED_OUT)
            }
            Widget::Task { checked: false, .. } => style.fg(self.text),
            Widget::Math { .. } => style.fg(self.code).add_modifier(Modifier::ITALIC),
            Widget::Callout { kind, .. } => style
                .fg(callout_color(*kind, self))
                .add_modifier(Modifier::BOLD),
        }
    }
}

fn callout_color(kind: CalloutKind, palette: &Palette) -> Color {
    match kind {
        CalloutKind::Warning | CalloutKind::Question => Color::Yellow,
        CalloutKind::Failure | CalloutKind::Danger | CalloutKind::Bug => Color::Red,
        CalloutKind::Success | CalloutKind::Todo => Color::Green,
        CalloutKind::Tip | CalloutKind::Info | CalloutKind::Note | CalloutKind::Unknown => {
            palette.link
        }
        CalloutKind::Abstract | CalloutKind::Example | CalloutKind::Quote => palette.muted,
    }
}

/// One rendered document line and where the cursor sits in it.
pub struct RenderedLine {
    pub line: Line<'static>,
    /// Column of the cursor, if it is on this line.
    pub cursor_col: Option<u16>,
}

/// Renders every line of `text`. `spans` must be sorted by `from`.
pub fn render_document(
    text: &str,
    spans: &[AnnotationSpan],
    cursor: usize,
    palette: &Palette,
) -> Vec<RenderedLine> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut first = 0usize;

    for raw in text.split('\n') {
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        let end = start + content.len();

        // Spans are sorted; skip those entirely before this line.
        while first < spans.len() && spans[first].to < start && spans[first].from < start {
            first += 1;
        }
        let on_line: Vec<&AnnotationSpan> = spans[first..]
            .iter()
            .take_while(|s| s.from <= end)
            .filter(|s| s.from >= start && s.to <= end)
            .collect();

        let cursor_here = (start..=end).contains(&cursor).then_some(cursor);
        out.push(render_line(content, start, &on_line, cursor_here, palette));
        start += raw.len() + 1;
    }
    out
}

fn render_line(
    content: &str,
    start: usize,
    spans: &[&AnnotationSpan],
    cursor: Option<usize>,
    palette: &Palette,
) -> RenderedLine {
    // Greedy: a REPLACE overlapping an earlier accepted one is not painted.
    let mut replaces: Vec<(usize, usize, &Widget)> = Vec::new();
    for span in spans {
        if let Payload::Replace(widget) = &span.payload
            && replaces.last().is_none_or(|(_, to, _)| span.from >= *to)
        {
            replaces.push((span.from, span.to, widget));
        }
    }
    let marks: Vec<(usize, usize, Mark)> = spans
        .iter()
        .filter_map(|s| match s.payload {
            Payload::Mark(m) => Some((s.from, s.to, m)),
            Payload::Replace(_) => None,
        })
        .collect();

    let mut pieces: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default().fg(palette.text);
    let mut width = 0u16;
    let mut cursor_col = None;
    let mut next_replace = 0usize;

    let mut chars = content.char_indices().peekable();
    while let Some(&(i, c)) = chars.peek() {
        let pos = start + i;
        if cursor == Some(pos) {
            cursor_col = Some(width);
        }

        if let Some(&(from, to, widget)) = replaces.get(next_replace)
            && from == pos
        {
            flush(&mut pieces, &mut run, run_style);
            let shown = widget.display_text();
            if let Some(at) = cursor
                && at > from
                && at < to
            {
                cursor_col = Some(width);
            }
            width = width.saturating_add(shown.chars().count() as u16);
            if !shown.is_empty() {
                pieces.push(Span::styled(shown, palette.widget(widget)));
            }
            next_replace += 1;
            while chars.peek().is_some_and(|&(j, _)| start + j < to) {
                chars.next();
            }
            continue;
        }

        let style = marks
            .iter()
            .filter(|(from, to, _)| *from <= pos && pos < *to)
            .fold(Style::default().fg(palette.text), |acc, (_, _, m)| {
                acc.patch(palette.mark(*m))
            });
        if style != run_style {
            flush(&mut pieces, &mut run, run_style);
            run_style = style;
        }
        run.push(c);
        width = width.saturating_add(1);
        chars.next();
    }
    flush(&mut pieces, &mut run, run_style);

    if cursor == Some(start + content.len()) {
        cursor_col = Some(width);
    }

    RenderedLine {
        line: Line::from(pieces),
        cursor_col,
    }
}

fn flush(pieces: &mut Vec<Span<'static>>, run: &mut String, style: Style) {
    if !run.is_empty() {
        pieces.push(Span::styled(std::mem::take(run), style));
    }
}
