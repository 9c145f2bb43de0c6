//! Whole-document decoration tests.
//!
//! Annotation sets are dumped one span per line and compared with inline
//! snapshots; every set also goes through the invariant checker.


use xi_rope::Rope;

use crate::{
    decorations::{AnnotationSpan, Payload, recompute},
    mode::DisplayMode,
    text::DocumentSnapshot,
};

const MIXED: &str = "# Hello\n> [!tip] Try it\n- [ ] buy milk\n* **bold** and `code`\n[[Page|alias]] $x$";

fn decorate(text: &str, cursor_line: Option<usize>, mode: DisplayMode) -> Vec<AnnotationSpan> {
    let rope = Rope::from(text);
    let spans = recompute(DocumentSnapshot::new(&rope), cursor_line, mode);
    invariants::check(text.len(), &spans);
    invariants::check_no_replace_overlap(&spans);
    spans
}

fn dump(text: &str, spans: &[AnnotationSpan]) -> String {
    spans
        .iter()
        .map(|s| {
            let src = text.get(s.from..s.to).unwrap_or("<invalid>");
            match &s.payload {
                Payload::Replace(w) => {
                    format!("{}..{} replace {} {src:?}", s.from, s.to, w.kind_name())
                }
                Payload::Mark(m) => format!("{}..{} mark {} {src:?}", s.from, s.to, m.class()),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn mixed_document_in_reading_mode() {
    let spans = decorate(MIXED, Some(3), DisplayMode::Reading);
    insta::assert_snapshot!(dump(MIXED, &spans), @r##"
0..2 replace hidden-markup "# "
2..7 mark cm-heading cm-heading-1 "Hello"
8..23 replace callout "> [!tip] Try it"
24..38 replace task "- [ ] buy milk"
39..41 mark cm-list-item "* "
41..43 replace hidden-markup "**"
43..47 mark cm-bold "bold"
47..49 replace hidden-markup "**"
54..55 replace hidden-markup "`"
55..59 mark cm-inline-code "code"
59..60 replace hidden-markup "`"
61..75 replace wikilink "[[Page|alias]]"
76..79 replace math "$x$"
"##);
}

#[test]
fn mixed_document_leaves_cursor_line_raw() {
    let spans = decorate(MIXED, Some(3), DisplayMode::LivePreview);
    insta::assert_snapshot!(dump(MIXED, &spans), @r##"
0..2 replace hidden-markup "# "
2..7 mark cm-heading cm-heading-1 "Hello"
8..23 replace callout "> [!tip] Try it"
24..38 replace task "- [ ] buy milk"
61..75 replace wikilink "[[Page|alias]]"
76..79 replace math "$x$"
"##);
}

#[test]
fn mixed_document_in_source_mode() {
    assert!(decorate(MIXED, None, DisplayMode::Source).is_empty());
}

#[test]
fn lone_star_policy() {
    let text = "*a**b*";
    let spans = decorate(text, None, DisplayMode::Reading);
    assert!(spans.is_empty(), "unexpected spans:\n{}", dump(text, &spans));
}

#[test]
fn unclosed_constructs_stay_raw() {
    let text = "**open `tick [[link $math ~~strike [t](";
    assert!(decorate(text, None, DisplayMode::Reading).is_empty());
}

#[test]
fn multiline_callout_body_is_not_merged() {
    let text = "> [!note] Title\n> body line";
    let spans = decorate(text, None, DisplayMode::Reading);
    insta::assert_snapshot!(dump(text, &spans), @r#"
0..15 replace callout "> [!note] Title"
16..18 replace hidden-markup "> "
18..27 mark cm-blockquote "body line"
"#);
}

#[test]
fn fenced_code_is_line_by_line() {
    let text = "```\n**x**\n```";
    let spans = decorate(text, None, DisplayMode::Reading);
    // The fence lines are plain text; the middle line is decorated as usual.
    assert_eq!(spans.len(), 3);
    assert!(spans.iter().all(|s| (4..9).contains(&s.from)));
}
