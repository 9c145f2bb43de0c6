use std::ops::Range;

use anyhow::Context;
use xi_rope::{Rope, delta::Builder};

use crate::{
    decorations::AnnotationSpan,
    error::EngineError,
    matchers::{InlineMatch, inline::find_wikilinks},
    mode::{DisplayMode, Theme},
    text::DocumentSnapshot,
    tracker::{LivePreview, Update},
};

/// Settings recognised at creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorOptions {
    /// Visual only.
    pub theme: Theme,
    /// Initial display mode.
    pub mode: DisplayMode,
}

/// Receives the raw target of an activated wikilink. Opening or creating the
/// file is up to the receiver.
pub trait WikilinkListener: Send {
    fn on_wikilink(&self, target: &str);
}

impl<F: Fn(&str) + Send> WikilinkListener for F {
    fn on_wikilink(&self, target: &str) {
        self(target)
    }
}

/// One open document: its text, primary cursor and live-preview state.
///
/// Every text, cursor or mode change recomputes the decorations before
/// returning, so [`decorations`](Self::decorations) always matches the
/// current text.
pub struct Editor {
    rope: Rope,
    cursor: usize,
    theme: Theme,
    version: u64,
    preview: LivePreview,
    listeners: Vec<Box<dyn WikilinkListener>>,
}

impl Editor {
    pub fn new(text: &str, options: EditorOptions) -> Self {
        let rope = Rope::from(text);
        let preview = LivePreview::new(DocumentSnapshot::new(&rope), 0, options.mode);
        Self {
            rope,
            cursor: 0,
            theme: options.theme,
            version: 0,
            preview,
            listeners: Vec::new(),
        }
    }

    /// Create an editor from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8], options: EditorOptions) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes).context("document is not valid UTF-8")?;
        Ok(Self::new(text, options))
    }

    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.content().into_bytes()
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Incremented on every text change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> DocumentSnapshot<'_> {
        DocumentSnapshot::new(&self.rope)
    }

    /// Replaces the whole text. Returns `false` and changes nothing when the
    /// text is identical; otherwise the cursor moves to
    /// `min(previous, new length)`.
    pub fn set_content(&mut self, text: &str) -> bool {
        if self.content() == text {
            return false;
        }
        self.rope = Rope::from(text);
        self.cursor = floor_char_boundary(text, self.cursor.min(text.len()));
        self.version += 1;
        self.refresh(Update::text_changed().with_selection(self.cursor));
        true
    }

    /// Inserts `text` at `at`. A cursor at or after `at` moves past the
    /// insertion. Returns the new version.
    pub fn insert(&mut self, at: usize, text: &str) -> Result<u64, EngineError> {
        self.check_offset(at)?;
        if text.is_empty() {
            return Ok(self.version);
        }
        self.replace(at..at, text);
        if self.cursor >= at {
            self.cursor += text.len();
        }
        self.version += 1;
        self.refresh(Update::text_changed().with_selection(self.cursor));
        Ok(self.version)
    }

    /// Deletes `range`. A cursor inside it moves to its start. Returns the
    /// new version.
    pub fn delete(&mut self, range: Range<usize>) -> Result<u64, EngineError> {
        self.check_offset(range.start)?;
        self.check_offset(range.end)?;
        if range.start >= range.end {
            return Ok(self.version);
        }
        self.replace(range.clone(), "");
        if self.cursor >= range.end {
            self.cursor -= range.len();
        } else if self.cursor > range.start {
            self.cursor = range.start;
        }
        self.version += 1;
        self.refresh(Update::text_changed().with_selection(self.cursor));
        Ok(self.version)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the primary cursor, clamped into the document and onto a
    /// character boundary. Returns where it landed.
    pub fn set_cursor(&mut self, offset: usize) -> usize {
        let text = self.content();
        self.cursor = floor_char_boundary(&text, offset.min(text.len()));
        self.refresh(Update::selection_changed(self.cursor));
        self.cursor
    }

    pub fn cursor_line(&self) -> Option<usize> {
        self.preview.cursor_line()
    }

    pub fn mode(&self) -> DisplayMode {
        self.preview.mode()
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.refresh(Update::mode_changed(mode));
    }

    /// `source → live-preview → reading → source`. Returns the new mode.
    pub fn cycle_mode(&mut self) -> DisplayMode {
        let next = self.mode().next();
        self.set_mode(next);
        next
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Visual only; decorations are not recomputed.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// The cached annotation set, sorted by `from`.
    pub fn decorations(&self) -> &[AnnotationSpan] {
        self.preview.decorations()
    }

    pub fn on_wikilink(&mut self, listener: impl WikilinkListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Activates the wikilink covering `offset`, if any: every listener is
    /// told its raw target, which is also returned.
    ///
    /// Works in every mode, including on the raw cursor line.
    pub fn activate_at(&self, offset: usize) -> Option<String> {
        let target = self.wikilink_at(offset)?;
        log::debug!("wikilink activated: {target}");
        for listener in &self.listeners {
            listener.on_wikilink(&target);
        }
        Some(target)
    }

    /// Raw target of the wikilink covering `offset`. Listeners are not told.
    pub fn wikilink_at(&self, offset: usize) -> Option<String> {
        let snapshot = self.snapshot();
        let line = snapshot
            .line_of_offset(offset)
            .ok()
            .and_then(|index| snapshot.line(index))?;

        find_wikilinks(line.span.start, &line.text)
            .into_iter()
            .find_map(|m| match m {
                InlineMatch::WikiLink { full, target, .. } if full.contains(offset) => {
                    line.text
                        .get(target.start - line.span.start..target.end - line.span.start)
                        .map(str::to_string)
                }
                _ => None,
            })
    }

    fn replace(&mut self, range: Range<usize>, text: &str) {
        let mut builder = Builder::new(self.rope.len());
        builder.replace(range, Rope::from(text));
        self.rope = builder.build().apply(&self.rope);
    }

    fn refresh(&mut self, update: Update) {
        self.preview.update(DocumentSnapshot::new(&self.rope), update);
    }

    fn check_offset(&self, offset: usize) -> Result<(), EngineError> {
        let len = self.len();
        if offset > len {
            return Err(EngineError::OffsetOutOfRange { offset, len });
        }
        if !self.content().is_char_boundary(offset) {
            return Err(EngineError::NotCharBoundary { offset });
        }
        Ok(())
    }
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn reading(text: &str) -> Editor {
        Editor::new(
            text,
            EditorOptions {
                mode: DisplayMode::Reading,
                ..Default::default()
            },
        )
    }

    #[test]
    fn defaults_are_dark_live_preview() {
        let editor = Editor::new("", EditorOptions::default());
        assert_eq!(editor.theme(), Theme::Dark);
        assert_eq!(editor.mode(), DisplayMode::LivePreview);
        assert_eq!(editor.cursor(), 0);
        assert!(editor.is_empty());
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(Editor::from_bytes(&[0xFF, 0xFE], EditorOptions::default()).is_err());
        let editor = Editor::from_bytes("# ok".as_bytes(), EditorOptions::default()).unwrap();
        assert_eq!(editor.to_bytes(), b"# ok");
    }

    #[test]
    fn set_content_round_trips_and_rehomes_cursor() {
        let mut editor = reading("a long first document");
        editor.set_cursor(15);
        assert!(editor.set_content("short"));
        assert_eq!(editor.content(), "short");
        assert_eq!(editor.cursor(), 5);
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn set_content_keeps_cursor_inside_new_text() {
        let mut editor = reading("0123456789");
        editor.set_cursor(3);
        editor.set_content("abcdefghijkl");
        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn set_content_snaps_cursor_to_char_boundary() {
        let mut editor = reading("abcdef");
        editor.set_cursor(2);
        editor.set_content("aé");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn unchanged_content_is_a_no_op() {
        let mut editor = reading("same");
        assert!(!editor.set_content("same"));
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn insert_and_delete_move_cursor_and_redecorate() {
        let mut editor = reading("bold");
        editor.set_cursor(4);
        assert_eq!(editor.insert(0, "**"), Ok(1));
        assert_eq!(editor.insert(6, "**"), Ok(2));
        assert_eq!(editor.content(), "**bold**");
        assert_eq!(editor.cursor(), 8);
        assert_eq!(editor.decorations().len(), 3);

        assert_eq!(editor.delete(0..2), Ok(3));
        assert_eq!(editor.content(), "bold**");
        assert_eq!(editor.cursor(), 6);
        assert!(editor.decorations().is_empty());
    }

    #[test]
    fn delete_pulls_cursor_to_range_start() {
        let mut editor = reading("abcdef");
        editor.set_cursor(3);
        editor.delete(1..5).unwrap();
        assert_eq!(editor.content(), "af");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn edits_reject_bad_offsets() {
        let mut editor = reading("é");
        assert_eq!(
            editor.insert(5, "x"),
            Err(EngineError::OffsetOutOfRange { offset: 5, len: 2 })
        );
        assert_eq!(
            editor.insert(1, "x"),
            Err(EngineError::NotCharBoundary { offset: 1 })
        );
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn set_cursor_clamps() {
        let mut editor = reading("abc");
        assert_eq!(editor.set_cursor(100), 3);
        assert_eq!(editor.cursor_line(), Some(0));
    }

    #[test]
    fn cycling_three_times_returns_to_start() {
        let mut editor = Editor::new("# x", EditorOptions::default());
        let start = editor.mode();
        assert_eq!(editor.cycle_mode(), DisplayMode::Reading);
        assert_eq!(editor.cycle_mode(), DisplayMode::Source);
        assert_eq!(editor.cycle_mode(), DisplayMode::LivePreview);
        assert_eq!(editor.mode(), start);
    }

    #[test]
    fn theme_change_does_not_touch_decorations() {
        let mut editor = reading("# x");
        let before = editor.decorations().to_vec();
        editor.set_theme(Theme::Light);
        assert_eq!(editor.theme(), Theme::Light);
        assert_eq!(editor.decorations(), before.as_slice());
    }

    #[test]
    fn activating_a_wikilink_notifies_listeners() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut editor = reading("see [[Target Page|here]] now");
        let sink = Arc::clone(&seen);
        editor.on_wikilink(move |target: &str| {
            sink.lock().unwrap().push(target.to_string());
        });

        assert_eq!(editor.activate_at(2), None);
        assert_eq!(editor.activate_at(10), Some("Target Page".to_string()));
        assert_eq!(*seen.lock().unwrap(), vec!["Target Page".to_string()]);
    }

    #[test]
    fn looking_up_a_wikilink_does_not_notify() {
        let seen = Arc::new(Mutex::new(0));
        let mut editor = reading("[[Quiet]]");
        let count = Arc::clone(&seen);
        editor.on_wikilink(move |_: &str| *count.lock().unwrap() += 1);

        assert_eq!(editor.wikilink_at(3), Some("Quiet".to_string()));
        assert_eq!(*seen.lock().unwrap(), 0);
        editor.activate_at(3);
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn activation_works_on_raw_cursor_line() {
        let mut editor = Editor::new("x\n[[Other]]", EditorOptions::default());
        editor.set_cursor(4);
        assert!(editor.decorations().is_empty());
        assert_eq!(editor.activate_at(4), Some("Other".to_string()));
        assert_eq!(editor.activate_at(100), None);
    }
}
