//! # Widgets
//!
//! The rendered substitute for a REPLACE span. One closed enum; each host
//! picks the rendering it can paint: [`Widget::to_html`] for web views,
//! [`Widget::display_text`] for terminals.

pub mod math;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::matchers::CalloutKind;

pub use math::{MathRender, render_math};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Markup hidden from view, e.g. `**` or `# `. Renders as nothing.
    HiddenMarkup { markup: String },
    /// `[text](url)`, opened outside the editor.
    Link { text: String, url: String },
    Image { alt: String, src: String },
    /// Checkbox and label standing in for a whole task line.
    Task { checked: bool, text: String },
    /// Activating it raises a resolution request for `target`.
    WikiLink { target: String, display: String },
    Math { latex: String, display: bool },
    Callout {
        kind: CalloutKind,
        name: String,
        title: String,
        content: String,
        folded: bool,
    },
}

impl Widget {
    /// Short stable name, used in dumps and across the FFI boundary.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Widget::HiddenMarkup { .. } => "hidden-markup",
            Widget::Link { .. } => "link",
            Widget::Image { .. } => "image",
            Widget::Task { .. } => "task",
            Widget::WikiLink { .. } => "wikilink",
            Widget::Math { .. } => "math",
            Widget::Callout { .. } => "callout",
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Widget::HiddenMarkup { .. } => {
                r#"<span class="cm-hidden-markup" aria-hidden="true"></span>"#.to_string()
            }
            Widget::Link { text: label, url } => format!(
                r#"<a class="cm-link-widget" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                attr(url),
                text(label),
            ),
            Widget::Image { alt, src } => format!(
                r#"<img class="cm-image-widget" alt="{}" src="{}">"#,
                attr(alt),
                attr(src),
            ),
            Widget::Task { checked, text: label } => format!(
                r#"<div class="cm-task-list-item"><input type="checkbox" class="cm-task-checkbox"{}><span class="cm-task-text">{}</span></div>"#,
                if *checked { " checked" } else { "" },
                text(label),
            ),
            Widget::WikiLink { target, display } => format!(
                r##"<a class="cm-wikilink" href="#" title="Open: {target}" data-target="{target}">{}</a>"##,
                text(display),
                target = attr(target),
            ),
            Widget::Math { latex, display } => render_math(latex, *display).into_html(),
            Widget::Callout {
                kind,
                name,
                title,
                content,
                folded,
            } => {
                let body = if *folded {
                    String::new()
                } else {
                    format!(r#"<div class="cm-callout-content">{}</div>"#, text(content))
                };
                format!(
                    r#"<div class="cm-callout {}" data-callout="{}" data-folded="{folded}"><div class="cm-callout-title"><span class="cm-callout-icon">{}</span><span class="cm-callout-title-inner">{}</span></div>{body}</div>"#,
                    kind.color_class(),
                    attr(name),
                    kind.icon(),
                    text(title),
                )
            }
        }
    }

    /// What a text-only host shows in place of the hidden source.
    pub fn display_text(&self) -> String {
        match self {
            Widget::HiddenMarkup { .. } => String::new(),
            Widget::Link { text, .. } => text.clone(),
            Widget::Image { alt, .. } => format!("🖼 {alt}"),
            Widget::Task { checked: true, text } => format!("☑ {text}"),
            Widget::Task { checked: false, text } => format!("☐ {text}"),
            Widget::WikiLink { display, .. } => display.clone(),
            Widget::Math { latex, .. } => latex.clone(),
            Widget::Callout {
                kind,
                title,
                folded,
                ..
            } => {
                if *folded {
                    format!("{} {title} ▸", kind.icon())
                } else {
                    format!("{} {title}", kind.icon())
                }
            }
        }
    }
}
