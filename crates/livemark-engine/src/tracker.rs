use crate::{
    decorations::{AnnotationSpan, DecorationBuilder, LineDecorator, MarkdownLineDecorator},
    mode::DisplayMode,
    text::DocumentSnapshot,
};

/// What happened since the last pass. Anything else the host observes is not
/// an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Update {
    pub doc_changed: bool,
    /// New primary selection head, if the selection changed.
    pub selection: Option<usize>,
    /// New display mode, if one was set.
    pub mode: Option<DisplayMode>,
}

impl Update {
    pub fn text_changed() -> Self {
        Self {
            doc_changed: true,
            ..Self::default()
        }
    }

    pub fn selection_changed(head: usize) -> Self {
        Self {
            selection: Some(head),
            ..Self::default()
        }
    }

    pub fn mode_changed(mode: DisplayMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn with_selection(self, head: usize) -> Self {
        Self {
            selection: Some(head),
            ..self
        }
    }
}

/// Cursor line, display mode and the cached annotation set for one document.
///
/// The cached set is replaced wholesale by each pass, never edited.
pub struct LivePreview<D = MarkdownLineDecorator> {
    builder: DecorationBuilder<D>,
    mode: DisplayMode,
    cursor_line: Option<usize>,
    decorations: Vec<AnnotationSpan>,
}

impl LivePreview {
    pub fn new(snapshot: DocumentSnapshot<'_>, head: usize, mode: DisplayMode) -> Self {
        Self::with_decorator(MarkdownLineDecorator, snapshot, head, mode)
    }
}

impl<D: LineDecorator> LivePreview<D> {
    pub fn with_decorator(
        decorator: D,
        snapshot: DocumentSnapshot<'_>,
        head: usize,
        mode: DisplayMode,
    ) -> Self {
        let builder = DecorationBuilder::with_decorator(decorator);
        let cursor_line = cursor_line_of(snapshot, head);
        let decorations = builder.recompute(snapshot, cursor_line, mode);
        Self {
            builder,
            mode,
            cursor_line,
            decorations,
        }
    }

    /// Applies `update` and recomputes if the text changed, the cursor moved
    /// to another line, or the mode changed. Returns whether a pass ran.
    pub fn update(&mut self, snapshot: DocumentSnapshot<'_>, update: Update) -> bool {
        let mode = update.mode.unwrap_or(self.mode);
        let cursor_line = match update.selection {
            Some(head) => cursor_line_of(snapshot, head),
            None => self.cursor_line,
        };
        if !update.doc_changed && mode == self.mode && cursor_line == self.cursor_line {
            return false;
        }

        if mode != self.mode {
            log::debug!("display mode {} -> {mode}", self.mode);
            self.mode = mode;
        }
        self.cursor_line = cursor_line;
        self.decorations = self.builder.recompute(snapshot, self.cursor_line, self.mode);
        true
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// `None` when no line counts as the cursor's.
    pub fn cursor_line(&self) -> Option<usize> {
        self.cursor_line
    }

    pub fn decorations(&self) -> &[AnnotationSpan] {
        &self.decorations
    }
}

fn cursor_line_of(snapshot: DocumentSnapshot<'_>, head: usize) -> Option<usize> {
    snapshot
        .line_of_offset(head)
        .inspect_err(|e| log::debug!("no cursor line: {e}"))
        .ok()
}
