use crate::{
    error::DecorateError,
    matchers::{
        InlineMatch, LineConstruct, MarkdownLineClassifier,
        inline::{
            find_code_spans, find_emphasis, find_images, find_links, find_math,
            find_strikethrough, find_strong, find_wikilinks,
        },
        kinds::Image,
    },
    text::Span,
    widgets::Widget,
};

use super::span::{AnnotationSpan, Mark};

/// Turns one line into its annotation spans.
///
/// `start` is the absolute offset of the line; returned spans are absolute.
/// An `Err` drops the whole line's output, never the pass.
pub trait LineDecorator {
    fn decorate(&self, line: &str, start: usize) -> Result<Vec<AnnotationSpan>, DecorateError>;
}

/// The markdown rules: the first exclusive line construct wins, otherwise the
/// list prefix (if any) is marked and every inline matcher runs on the rest.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownLineDecorator;

impl LineDecorator for MarkdownLineDecorator {
    fn decorate(&self, line: &str, start: usize) -> Result<Vec<AnnotationSpan>, DecorateError> {
        let mut out = vec![];
        match MarkdownLineClassifier.classify(line) {
            LineConstruct::Blank => {}
            LineConstruct::Heading {
                level,
                marker,
                text,
            } => {
                out.push(hide(line, start, marker)?);
                slice(line, text)?;
                let text = text.offset(start);
                out.push(AnnotationSpan::mark(text.start, text.end, Mark::Heading(level)));
            }
            LineConstruct::Callout {
                kind,
                name,
                title,
                folded,
            } => {
                out.push(AnnotationSpan::replace(
                    start,
                    start + line.len(),
                    Widget::Callout {
                        kind,
                        name,
                        title,
                        content: String::new(),
                        folded,
                    },
                ));
            }
            LineConstruct::BlockQuote { marker, body } => {
                out.push(hide(line, start, marker)?);
                if !slice(line, body)?.is_empty() {
                    let body = body.offset(start);
                    out.push(AnnotationSpan::mark(body.start, body.end, Mark::BlockQuote));
                }
            }
            LineConstruct::Task { checked, label } => {
                out.push(AnnotationSpan::replace(
                    start,
                    start + line.len(),
                    Widget::Task {
                        checked,
                        text: slice(line, label)?.to_string(),
                    },
                ));
            }
            LineConstruct::ListItem { prefix } => {
                slice(line, prefix)?;
                let abs = prefix.offset(start);
                out.push(AnnotationSpan::mark(abs.start, abs.end, Mark::ListItem));
                let rest = slice(line, Span::new(prefix.end, line.len()))?;
                out.extend(decorate_inline(rest, abs.end)?);
            }
            LineConstruct::Plain => out.extend(decorate_inline(line, start)?),
        }
        Ok(out)
    }
}

/// All inline matchers over `s`, which starts at absolute offset `base`.
///
/// Outputs are concatenated in matcher order; the builder sorts them.
pub fn decorate_inline(s: &str, base: usize) -> Result<Vec<AnnotationSpan>, DecorateError> {
    let matchers: [fn(usize, &str) -> Vec<InlineMatch>; 8] = [
        find_code_spans,
        find_strong,
        find_emphasis,
        find_strikethrough,
        find_links,
        find_images,
        find_wikilinks,
        find_math,
    ];

    let mut out = vec![];
    for find in matchers {
        for m in find(base, s) {
            annotate(s, base, m, &mut out)?;
        }
    }
    Ok(out)
}

fn annotate(
    s: &str,
    base: usize,
    m: InlineMatch,
    out: &mut Vec<AnnotationSpan>,
) -> Result<(), DecorateError> {
    let text = |sp: Span| slice(s, local(sp, base)).map(str::to_string);

    match m {
        InlineMatch::Code { full, inner } => delimited(s, base, full, inner, Mark::InlineCode, out)?,
        InlineMatch::Strong { full, inner } => delimited(s, base, full, inner, Mark::Strong, out)?,
        InlineMatch::Emphasis { full, inner } => {
            delimited(s, base, full, inner, Mark::Emphasis, out)?
        }
        InlineMatch::Strikethrough { full, inner } => {
            delimited(s, base, full, inner, Mark::Strikethrough, out)?
        }
        InlineMatch::Link { full, text: t, url } => {
            let widget = Widget::Link {
                text: text(t)?,
                url: text(url)?,
            };
            out.push(AnnotationSpan::replace(full.start, full.end, widget));
        }
        InlineMatch::Image { full, alt, src } => {
            let alt = text(alt)?;
            let widget = Widget::Image {
                alt: if alt.is_empty() {
                    Image::DEFAULT_ALT.to_string()
                } else {
                    alt
                },
                src: text(src)?,
            };
            out.push(AnnotationSpan::replace(full.start, full.end, widget));
        }
        InlineMatch::WikiLink {
            full,
            target,
            display,
        } => {
            let target = text(target)?;
            let display = match display {
                Some(d) => text(d)?,
                None => target.clone(),
            };
            out.push(AnnotationSpan::replace(
                full.start,
                full.end,
                Widget::WikiLink { target, display },
            ));
        }
        InlineMatch::Math {
            full,
            body,
            display,
        } => {
            let widget = Widget::Math {
                latex: text(body)?,
                display,
            };
            out.push(AnnotationSpan::replace(full.start, full.end, widget));
        }
    }
    Ok(())
}

/// Hidden opening delimiter, marked interior, hidden closing delimiter.
fn delimited(
    s: &str,
    base: usize,
    full: Span,
    inner: Span,
    mark: Mark,
    out: &mut Vec<AnnotationSpan>,
) -> Result<(), DecorateError> {
    out.push(hide(s, base, local(Span::new(full.start, inner.start), base))?);
    out.push(AnnotationSpan::mark(inner.start, inner.end, mark));
    out.push(hide(s, base, local(Span::new(inner.end, full.end), base))?);
    Ok(())
}

/// REPLACE span hiding the local span `sp` of `s`.
fn hide(s: &str, base: usize, sp: Span) -> Result<AnnotationSpan, DecorateError> {
    let markup = slice(s, sp)?;
    let abs = sp.offset(base);
    Ok(AnnotationSpan::hidden(abs.start, abs.end, markup))
}

fn local(sp: Span, base: usize) -> Span {
    Span::new(sp.start.saturating_sub(base), sp.end.saturating_sub(base))
}

/// Checked slice: the span must be ordered and land on character boundaries.
fn slice(s: &str, sp: Span) -> Result<&str, DecorateError> {
    if sp.start > sp.end {
        return Err(DecorateError::InvertedRange {
            start: sp.start,
            end: sp.end,
        });
    }
    s.get(sp.start..sp.end).ok_or_else(|| DecorateError::InvalidBoundary {
        at: if s.is_char_boundary(sp.start) {
            sp.end
        } else {
            sp.start
        },
        len: s.len(),
    })
}
