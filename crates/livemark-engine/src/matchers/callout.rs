
/// Callout families and their aliases, e.g. `> [!tip]` or `> [!hint]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalloutKind {
    Note,
    Abstract,
    Info,
    Todo,
    Tip,
    Success,
    Question,
    Warning,
    Failure,
    Danger,
    Bug,
    Example,
    Quote,
    /// Any unrecognised type name; styled like a note with a pin icon.
    Unknown,
}

impl CalloutKind {
    /// Looks up a type name case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "note" => CalloutKind::Note,
            "abstract" | "summary" | "tldr" => CalloutKind::Abstract,
            "info" => CalloutKind::Info,
            "todo" => CalloutKind::Todo,
            "tip" | "hint" | "important" => CalloutKind::Tip,
            "success" | "check" | "done" => CalloutKind::Success,
            "question" | "help" | "faq" => CalloutKind::Question,
            "warning" | "caution" | "attention" => CalloutKind::Warning,
            "failure" | "fail" | "missing" => CalloutKind::Failure,
            "danger" | "error" => CalloutKind::Danger,
            "bug" => CalloutKind::Bug,
            "example" => CalloutKind::Example,
            "quote" | "cite" => CalloutKind::Quote,
            _ => CalloutKind::Unknown,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CalloutKind::Note => "✏️",
            CalloutKind::Abstract => "📋",
            CalloutKind::Info => "ℹ️",
            CalloutKind::Todo => "☑️",
            CalloutKind::Tip => "🔥",
            CalloutKind::Success => "✅",
            CalloutKind::Question => "❓",
            CalloutKind::Warning => "⚠️",
            CalloutKind::Failure => "❌",
            CalloutKind::Danger => "⚡",
            CalloutKind::Bug => "🐞",
            CalloutKind::Example => "📑",
            CalloutKind::Quote => "💬",
            CalloutKind::Unknown => "📌",
        }
    }

    /// CSS class carrying the callout's colour.
    pub fn color_class(self) -> &'static str {
        match self {
            CalloutKind::Note | CalloutKind::Unknown => "callout-note",
            CalloutKind::Abstract => "callout-abstract",
            CalloutKind::Info => "callout-info",
            CalloutKind::Todo => "callout-todo",
            CalloutKind::Tip => "callout-tip",
            CalloutKind::Success => "callout-success",
            CalloutKind::Question => "callout-question",
            CalloutKind::Warning => "callout-warning",
            CalloutKind::Failure => "callout-failure",
            CalloutKind::Danger => "callout-danger",
            CalloutKind::Bug => "callout-bug",
            CalloutKind::Example => "callout-example",
            CalloutKind::Quote => "callout-quote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("note", CalloutKind::Note)]
    #[case("NOTE", CalloutKind::Note)]
    #[case("tldr", CalloutKind::Abstract)]
    #[case("summary", CalloutKind::Abstract)]
    #[case("hint", CalloutKind::Tip)]
    #[case("important", CalloutKind::Tip)]
    #[case("done", CalloutKind::Success)]
    #[case("faq", CalloutKind::Question)]
    #[case("caution", CalloutKind::Warning)]
    #[case("missing", CalloutKind::Failure)]
    #[case("error", CalloutKind::Danger)]
    #[case("cite", CalloutKind::Quote)]
    #[case("bug", CalloutKind::Bug)]
    #[case("example", CalloutKind::Example)]
    fn aliases_map_to_families(#[case] name: &str, #[case] expected: CalloutKind) {
        assert_eq!(CalloutKind::from_name(name), expected);
    }

    #[test]
    fn unknown_type_is_note_styled_with_pin() {
        let kind = CalloutKind::from_name("recipe");
        assert_eq!(kind, CalloutKind::Unknown);
        assert_eq!(kind.color_class(), "callout-note");
        assert_eq!(kind.icon(), "📌");
        assert_ne!(kind.icon(), CalloutKind::Note.icon());
    }
}
