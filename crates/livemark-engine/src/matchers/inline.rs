use crate::text::Span;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Emphasis, Image, Link, Math, Strikethrough, Strong, WikiLink},
};

/// One recognised inline construct, with absolute spans.
///
/// Transient: rebuilt on every pass and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineMatch {
    /// `` `code` ``
    Code { full: Span, inner: Span },
    /// `**strong**`
    Strong { full: Span, inner: Span },
    /// `*emphasis*`
    Emphasis { full: Span, inner: Span },
    /// `~~struck~~`
    Strikethrough { full: Span, inner: Span },
    /// `[text](url)`
    Link { full: Span, text: Span, url: Span },
    /// `![alt](src)`; `alt` may be empty.
    Image { full: Span, alt: Span, src: Span },
    /// `[[target]]` / `[[target|display]]`
    WikiLink {
        full: Span,
        target: Span,
        display: Option<Span>,
    },
    /// `$$latex$$` (display) or `$latex$` (inline)
    Math {
        full: Span,
        body: Span,
        display: bool,
    },
}

impl InlineMatch {
    /// The whole range the construct occupies.
    pub fn full(&self) -> Span {
        match self {
            InlineMatch::Code { full, .. }
            | InlineMatch::Strong { full, .. }
            | InlineMatch::Emphasis { full, .. }
            | InlineMatch::Strikethrough { full, .. }
            | InlineMatch::Link { full, .. }
            | InlineMatch::Image { full, .. }
            | InlineMatch::WikiLink { full, .. }
            | InlineMatch::Math { full, .. } => *full,
        }
    }
}

/// Runs `try_parse` at every position, leftmost first, resuming after each
/// match.
fn scan<'a>(
    base: usize,
    s: &'a str,
    try_parse: impl Fn(&mut Cursor<'a>) -> Option<InlineMatch>,
) -> Vec<InlineMatch> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];
    while !cur.eof() {
        if let Some(m) = try_parse(&mut cur) {
            out.push(m);
            continue;
        }
        cur.bump();
    }
    out
}

pub fn find_code_spans(base: usize, s: &str) -> Vec<InlineMatch> {
    scan(base, s, |cur| {
        try_parse_delimited(cur, &[CodeSpan::TICK], CodeSpan::TICK)
            .map(|(full, inner)| InlineMatch::Code { full, inner })
    })
}

pub fn find_strong(base: usize, s: &str) -> Vec<InlineMatch> {
    scan(base, s, |cur| {
        try_parse_delimited(cur, Strong::DELIM, Strong::STAR)
            .map(|(full, inner)| InlineMatch::Strong { full, inner })
    })
}

pub fn find_emphasis(base: usize, s: &str) -> Vec<InlineMatch> {
    scan(base, s, try_parse_emphasis)
}

pub fn find_strikethrough(base: usize, s: &str) -> Vec<InlineMatch> {
    scan(base, s, |cur| {
        try_parse_delimited(cur, Strikethrough::DELIM, Strikethrough::TILDE)
            .map(|(full, inner)| InlineMatch::Strikethrough { full, inner })
    })
}

pub fn find_links(base: usize, s: &str) -> Vec<InlineMatch> {
    scan(base, s, try_parse_link)
}

pub fn find_images(base: usize, s: &str) -> Vec<InlineMatch> {
    scan(base, s, try_parse_image)
}

pub fn find_wikilinks(base: usize, s: &str) -> Vec<InlineMatch> {
    scan(base, s, try_parse_wikilink)
}

/// Block math first, then inline math; an inline match starting inside an
/// accepted block match is discarded.
pub fn find_math(base: usize, s: &str) -> Vec<InlineMatch> {
    let mut out = scan(base, s, try_parse_block_math);
    let blocks: Vec<Span> = out.iter().map(InlineMatch::full).collect();
    out.extend(
        scan(base, s, try_parse_inline_math)
            .into_iter()
            .filter(|m| !blocks.iter().any(|b| b.contains(m.full().start))),
    );
    out
}

/// `delim body delim` where the body is non-empty and free of `forbidden`.
///
/// On failure, cursor position is restored.
fn try_parse_delimited(cur: &mut Cursor<'_>, delim: &[u8], forbidden: u8) -> Option<(Span, Span)> {
    if !cur.starts_with(delim) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(delim.len());
    let inner_start = cur.pos();
    cur.bump_until(forbidden);
    let inner_end = cur.pos();

    if inner_end == inner_start || !cur.starts_with(delim) {
        *cur = saved;
        return None;
    }
    cur.bump_n(delim.len());

    Some((Span::new(start, cur.pos()), Span::new(inner_start, inner_end)))
}

/// A lone `*`: the opener may not follow or precede another `*`, and the
/// closer may not be followed by one.
fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<InlineMatch> {
    if cur.peek() != Some(Emphasis::STAR) || cur.prev() == Some(Emphasis::STAR) {
        return None;
    }
    match cur.peek_at(1) {
        None | Some(Emphasis::STAR) => return None,
        Some(_) => {}
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();
    let inner_start = cur.pos();
    cur.bump_until(Emphasis::STAR);
    let inner_end = cur.pos();

    if cur.peek() != Some(Emphasis::STAR) || cur.peek_at(1) == Some(Emphasis::STAR) {
        *cur = saved;
        return None;
    }
    cur.bump();

    Some(InlineMatch::Emphasis {
        full: Span::new(start, cur.pos()),
        inner: Span::new(inner_start, inner_end),
    })
}

/// `[text](url)` and `![alt](src)` share this shape; returns the bracket and
/// paren interiors. `allow_empty_text` is only set for image alt text.
fn try_parse_bracket_paren(cur: &mut Cursor<'_>, allow_empty_text: bool) -> Option<(Span, Span)> {
    if cur.peek() != Some(Link::TEXT_OPEN) {
        return None;
    }
    cur.bump();
    let text_start = cur.pos();
    cur.bump_until(Link::TEXT_CLOSE);
    let text_end = cur.pos();
    if cur.peek() != Some(Link::TEXT_CLOSE) || (text_end == text_start && !allow_empty_text) {
        return None;
    }
    cur.bump();

    if cur.peek() != Some(Link::URL_OPEN) {
        return None;
    }
    cur.bump();
    let url_start = cur.pos();
    cur.bump_until(Link::URL_CLOSE);
    let url_end = cur.pos();
    if cur.peek() != Some(Link::URL_CLOSE) || url_end == url_start {
        return None;
    }
    cur.bump();

    Some((Span::new(text_start, text_end), Span::new(url_start, url_end)))
}

/// Not recognised right after a `!`; that instance is an image.
fn try_parse_link(cur: &mut Cursor<'_>) -> Option<InlineMatch> {
    if cur.peek() != Some(Link::TEXT_OPEN) || cur.prev() == Some(Image::BANG) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    match try_parse_bracket_paren(cur, false) {
        Some((text, url)) => Some(InlineMatch::Link {
            full: Span::new(start, cur.pos()),
            text,
            url,
        }),
        None => {
            *cur = saved;
            None
        }
    }
}

fn try_parse_image(cur: &mut Cursor<'_>) -> Option<InlineMatch> {
    if cur.peek() != Some(Image::BANG) || cur.peek_at(1) != Some(Link::TEXT_OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump(); // !
    match try_parse_bracket_paren(cur, true) {
        Some((alt, src)) => Some(InlineMatch::Image {
            full: Span::new(start, cur.pos()),
            alt,
            src,
        }),
        None => {
            *cur = saved;
            None
        }
    }
}

/// Attempts to parse a wikilink starting at the current position.
///
/// Handles both `[[target]]` and `[[target|display]]` forms. The target may
/// not contain `]` or `|`; the display text may not contain `]`; neither may
/// be empty. On failure, cursor position is restored.
fn try_parse_wikilink(cur: &mut Cursor<'_>) -> Option<InlineMatch> {
    if !cur.starts_with(WikiLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(WikiLink::OPEN.len());
    let target_start = cur.pos();

    while let Some(b) = cur.peek() {
        if b == WikiLink::ALIAS || b == WikiLink::BRACKET {
            break;
        }
        cur.bump();
    }
    let target_end = cur.pos();

    let mut display = None;
    if cur.peek() == Some(WikiLink::ALIAS) {
        cur.bump(); // |
        let display_start = cur.pos();
        cur.bump_until(WikiLink::BRACKET);
        let display_end = cur.pos();
        if display_end > display_start {
            display = Some(Span::new(display_start, display_end));
        } else {
            *cur = saved;
            return None;
        }
    }

    if target_end == target_start || !cur.starts_with(WikiLink::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiLink::CLOSE.len());

    Some(InlineMatch::WikiLink {
        full: Span::new(start, cur.pos()),
        target: Span::new(target_start, target_end),
        display,
    })
}

fn try_parse_block_math(cur: &mut Cursor<'_>) -> Option<InlineMatch> {
    try_parse_delimited(cur, Math::BLOCK, Math::DOLLAR).map(|(full, body)| InlineMatch::Math {
        full,
        body,
        display: true,
    })
}

/// A lone `$`, guarded the same way as emphasis so it never matches inside
/// `$$`.
fn try_parse_inline_math(cur: &mut Cursor<'_>) -> Option<InlineMatch> {
    if cur.peek() != Some(Math::DOLLAR) || cur.prev() == Some(Math::DOLLAR) {
        return None;
    }
    match cur.peek_at(1) {
        None | Some(Math::DOLLAR) => return None,
        Some(_) => {}
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();
    let body_start = cur.pos();
    cur.bump_until(Math::DOLLAR);
    let body_end = cur.pos();

    if cur.peek() != Some(Math::DOLLAR) || cur.peek_at(1) == Some(Math::DOLLAR) {
        *cur = saved;
        return None;
    }
    cur.bump();

    Some(InlineMatch::Math {
        full: Span::new(start, cur.pos()),
        body: Span::new(body_start, body_end),
        display: false,
    })
}
