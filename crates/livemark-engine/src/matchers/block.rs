use std::sync::OnceLock;

use regex::Regex;

use crate::text::Span;

use super::callout::CalloutKind;

/// Line-level interpretation of one line, with spans local to the line.
///
/// Everything except `ListItem` and `Plain` is exclusive: it takes over the
/// whole line and no inline matching happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineConstruct {
    /// Empty or whitespace-only.
    Blank,
    /// `## Title`. `marker` is the hash run plus one separating character.
    Heading { level: u8, marker: Span, text: Span },
    /// `> [!type]- Title`
    Callout {
        kind: CalloutKind,
        /// Lowercased type name as written.
        name: String,
        title: String,
        folded: bool,
    },
    /// `> quoted`. `marker` is the `>` plus following whitespace.
    BlockQuote { marker: Span, body: Span },
    /// `- [x] label`
    Task { checked: bool, label: Span },
    /// `- item`; `prefix` is the indentation, bullet and whitespace.
    ListItem { prefix: Span },
    /// No line-level construct.
    Plain,
}

impl LineConstruct {
    pub fn is_exclusive(&self) -> bool {
        !matches!(
            self,
            LineConstruct::ListItem { .. } | LineConstruct::Plain | LineConstruct::Blank
        )
    }
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("Invalid heading regex"))
}

fn callout_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^>\s*\[!(\w+)\]([+-])?\s*(.*)$").expect("Invalid callout regex")
    })
}

fn blockquote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^>\s*").expect("Invalid blockquote regex"))
}

fn task_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[ \t]*[-*+]\s+\[([ xX])\]\s+(.+)$").expect("Invalid task regex")
    })
}

fn list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[ \t]*[-*+]\s+").expect("Invalid list item regex"))
}

/// Classifies single lines, each independently of its neighbours.
///
/// Checks run in a fixed precedence order (heading, callout, blockquote,
/// task, list item); the first hit wins. Callouts must be tried before plain
/// blockquotes since every callout line is also a blockquote line.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    pub fn classify(&self, line: &str) -> LineConstruct {
        if line.trim().is_empty() {
            return LineConstruct::Blank;
        }

        if let Some(hashes) = heading_re().captures(line).and_then(|c| c.get(1)) {
            let separator = line[hashes.end()..].chars().next().map_or(0, char::len_utf8);
            let marker_end = hashes.end() + separator;
            return LineConstruct::Heading {
                level: hashes.len() as u8,
                marker: Span::new(0, marker_end),
                text: Span::new(marker_end, line.len()),
            };
        }

        if let Some(caps) = callout_re().captures(line) {
            let name = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
            let folded = caps.get(2).is_some_and(|m| m.as_str() == "-");
            let title = caps.get(3).map_or("", |m| m.as_str()).trim();
            let title = if title.is_empty() {
                default_title(&name)
            } else {
                title.to_string()
            };
            return LineConstruct::Callout {
                kind: CalloutKind::from_name(&name),
                name,
                title,
                folded,
            };
        }

        if let Some(m) = blockquote_re().find(line) {
            return LineConstruct::BlockQuote {
                marker: Span::new(0, m.end()),
                body: Span::new(m.end(), line.len()),
            };
        }

        if let Some(caps) = task_re().captures(line)
            && let (Some(mark), Some(label)) = (caps.get(1), caps.get(2))
        {
            return LineConstruct::Task {
                checked: mark.as_str() != " ",
                label: Span::new(label.start(), label.end()),
            };
        }

        if let Some(m) = list_re().find(line) {
            return LineConstruct::ListItem {
                prefix: Span::new(0, m.end()),
            };
        }

        LineConstruct::Plain
    }
}

/// `warning` becomes `Warning`.
fn default_title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classify(line: &str) -> LineConstruct {
        MarkdownLineClassifier.classify(line)
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t \t")]
    fn blank_lines(#[case] line: &str) {
        assert_eq!(classify(line), LineConstruct::Blank);
    }

    #[rstest]
    #[case("# Hello", 1, 2)]
    #[case("###### Six", 6, 7)]
    #[case("##\tTabbed", 2, 3)]
    #[case("#  Two spaces", 1, 2)]
    fn headings(#[case] line: &str, #[case] level: u8, #[case] marker_end: usize) {
        assert_eq!(
            classify(line),
            LineConstruct::Heading {
                level,
                marker: Span::new(0, marker_end),
                text: Span::new(marker_end, line.len()),
            }
        );
    }

    #[rstest]
    #[case("####### seven")]
    #[case("#nospace")]
    #[case("# ")]
    fn not_headings(#[case] line: &str) {
        assert!(!matches!(classify(line), LineConstruct::Heading { .. }));
    }

    #[test]
    fn heading_marker_covers_multibyte_separator() {
        // U+3000 IDEOGRAPHIC SPACE is whitespace and three bytes wide.
        let line = "#\u{3000}見出し";
        match classify(line) {
            LineConstruct::Heading { marker, .. } => {
                assert_eq!(marker, Span::new(0, 4));
                assert!(line.is_char_boundary(marker.end));
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn callout_with_title() {
        assert_eq!(
            classify("> [!WARNING] Mind the gap"),
            LineConstruct::Callout {
                kind: CalloutKind::Warning,
                name: "warning".to_string(),
                title: "Mind the gap".to_string(),
                folded: false,
            }
        );
    }

    #[test]
    fn folded_callout_without_title_uses_type_name() {
        assert_eq!(
            classify(">[!faq]-"),
            LineConstruct::Callout {
                kind: CalloutKind::Question,
                name: "faq".to_string(),
                title: "Faq".to_string(),
                folded: true,
            }
        );
    }

    #[test]
    fn expanded_marker_is_not_folded() {
        match classify("> [!tip]+ Open") {
            LineConstruct::Callout { folded, title, .. } => {
                assert!(!folded);
                assert_eq!(title, "Open");
            }
            other => panic!("expected callout, got {other:?}"),
        }
    }

    #[test]
    fn plain_blockquote() {
        assert_eq!(
            classify(">  quoted"),
            LineConstruct::BlockQuote {
                marker: Span::new(0, 3),
                body: Span::new(3, 9),
            }
        );
    }

    #[test]
    fn bare_blockquote_marker() {
        assert_eq!(
            classify(">"),
            LineConstruct::BlockQuote {
                marker: Span::new(0, 1),
                body: Span::new(1, 1),
            }
        );
    }

    #[rstest]
    #[case("- [x] done", true, 6)]
    #[case("* [X] shout", true, 6)]
    #[case("+ [ ] open", false, 6)]
    #[case("  - [ ] nested", false, 8)]
    fn tasks(#[case] line: &str, #[case] checked: bool, #[case] label_start: usize) {
        assert_eq!(
            classify(line),
            LineConstruct::Task {
                checked,
                label: Span::new(label_start, line.len()),
            }
        );
    }

    #[test]
    fn empty_task_label_is_a_list_item() {
        assert_eq!(
            classify("- [ ] "),
            LineConstruct::ListItem {
                prefix: Span::new(0, 2),
            }
        );
    }

    #[rstest]
    #[case("- item", 2)]
    #[case("*   spaced", 4)]
    #[case("\t+ tabbed", 3)]
    fn list_items(#[case] line: &str, #[case] prefix_end: usize) {
        let construct = classify(line);
        assert!(!construct.is_exclusive());
        assert_eq!(
            construct,
            LineConstruct::ListItem {
                prefix: Span::new(0, prefix_end),
            }
        );
    }

    #[rstest]
    #[case("plain text")]
    #[case("-not a list")]
    #[case("**bold** start")]
    fn plain_lines(#[case] line: &str) {
        assert_eq!(classify(line), LineConstruct::Plain);
    }

    #[test]
    fn heading_wins_over_everything() {
        assert!(matches!(
            classify("# > [!note] - [x] item"),
            LineConstruct::Heading { level: 1, .. }
        ));
    }
}
