//! LaTeX math typesetting via pulldown-latex → MathML

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_latex::{
    Parser, Storage,
    config::{DisplayMode as LatexDisplay, RenderConfig},
    mathml::push_mathml,
};

/// Outcome of typesetting one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathRender {
    /// MathML markup.
    Rendered(String),
    /// The delimited source in an error-styled element.
    Fallback { html: String, message: String },
}

impl MathRender {
    /// HTML for the host, whichever way typesetting went.
    pub fn into_html(self) -> String {
        match self {
            MathRender::Rendered(html) | MathRender::Fallback { html, .. } => html,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MathRender::Fallback { .. })
    }
}

/// Typesets `latex` (without its `$` delimiters). Never fails: parse and
/// render errors produce [`MathRender::Fallback`].
pub fn render_math(latex: &str, display: bool) -> MathRender {
    let storage = Storage::new();
    let parser = Parser::new(latex, &storage);
    let config = RenderConfig {
        display_mode: if display {
            LatexDisplay::Block
        } else {
            LatexDisplay::Inline
        },
        ..Default::default()
    };

    let events: Vec<_> = parser.collect();
    let errors: Vec<String> = events
        .iter()
        .filter_map(|e| e.as_ref().err().map(|err| err.to_string()))
        .collect();
    if !errors.is_empty() {
        let message = errors.join("; ");
        log::debug!("math fallback for {latex:?}: {message}");
        return MathRender::Fallback {
            html: fallback_html(latex, &message, display),
            message,
        };
    }

    let mut mathml = String::new();
    if let Err(e) = push_mathml(&mut mathml, events.into_iter(), config) {
        let message = e.to_string();
        log::debug!("math fallback for {latex:?}: {message}");
        return MathRender::Fallback {
            html: fallback_html(latex, &message, display),
            message,
        };
    }

    let class = mode_class(display);
    MathRender::Rendered(format!(r#"<span class="cm-math {class}">{mathml}</span>"#))
}

fn mode_class(display: bool) -> &'static str {
    if display {
        "cm-math-display"
    } else {
        "cm-math-inline"
    }
}

fn fallback_html(latex: &str, error: &str, display: bool) -> String {
    let delim = if display { "$$" } else { "$" };
    let class = mode_class(display);
    format!(
        r#"<span class="cm-math cm-math-error {class}" title="{}">{delim}{}{delim}</span>"#,
        encode_double_quoted_attribute(error),
        encode_text(latex),
    )
}
