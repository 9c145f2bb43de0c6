//! UniFFI bindings for livemark editor hosts
//!
//! Exposes one editor handle per open document: the host pushes text,
//! cursor and mode changes in and reads the decoration set back out.

use livemark_engine::{
    AnnotationSpan, DisplayMode, Editor, EditorOptions, EngineError, Payload, Theme, Widget,
};
use std::sync::{Arc, Mutex, MutexGuard};

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Edit error: {reason}")]
    EditError { reason: String },
}

impl From<EngineError> for FfiError {
    fn from(e: EngineError) -> Self {
        FfiError::EditError {
            reason: e.to_string(),
        }
    }
}

// ============ Enums ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ModeDto {
    Source,
    LivePreview,
    Reading,
}

impl From<DisplayMode> for ModeDto {
    fn from(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Source => ModeDto::Source,
            DisplayMode::LivePreview => ModeDto::LivePreview,
            DisplayMode::Reading => ModeDto::Reading,
        }
    }
}

impl From<ModeDto> for DisplayMode {
    fn from(mode: ModeDto) -> Self {
        match mode {
            ModeDto::Source => DisplayMode::Source,
            ModeDto::LivePreview => DisplayMode::LivePreview,
            ModeDto::Reading => DisplayMode::Reading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ThemeDto {
    Light,
    Dark,
}

impl From<Theme> for ThemeDto {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => ThemeDto::Light,
            Theme::Dark => ThemeDto::Dark,
        }
    }
}

impl From<ThemeDto> for Theme {
    fn from(theme: ThemeDto) -> Self {
        match theme {
            ThemeDto::Light => Theme::Light,
            ThemeDto::Dark => Theme::Dark,
        }
    }
}

// ============ Callbacks ============

/// Implemented by the host to open or create the target of a clicked
/// wikilink.
#[uniffi::export(with_foreign)]
pub trait WikilinkHandler: Send + Sync {
    fn on_wikilink(&self, target: String);
}

// ============ Editor Handle ============

/// A handle to one open document.
#[derive(uniffi::Object)]
pub struct EditorHandle {
    inner: Mutex<Editor>,
    /// Kept outside `inner` so handlers may call back into the handle.
    handlers: Mutex<Vec<Arc<dyn WikilinkHandler>>>,
    /// Mode the handle was created with, reported if the editor state is
    /// unreadable.
    default_mode: ModeDto,
}

#[uniffi::export]
impl EditorHandle {
    /// Create an editor. Missing options default to dark theme and
    /// live-preview mode.
    #[uniffi::constructor]
    pub fn new(initial_text: String, theme: Option<ThemeDto>, mode: Option<ModeDto>) -> Self {
        let options = EditorOptions {
            theme: theme.map(Theme::from).unwrap_or_default(),
            mode: mode.map(DisplayMode::from).unwrap_or_default(),
        };
        Self {
            inner: Mutex::new(Editor::new(&initial_text, options)),
            handlers: Mutex::new(Vec::new()),
            default_mode: options.mode.into(),
        }
    }

    pub fn get_content(&self) -> String {
        self.editor().content()
    }

    /// Replace the whole text. Returns false if it was unchanged.
    pub fn set_content(&self, text: String) -> bool {
        self.editor().set_content(&text)
    }

    pub fn insert(&self, at: u64, text: String) -> Result<u64, FfiError> {
        Ok(self.editor().insert(at as usize, &text)?)
    }

    pub fn delete(&self, start: u64, end: u64) -> Result<u64, FfiError> {
        Ok(self.editor().delete(start as usize..end as usize)?)
    }

    /// Move the primary cursor; returns the clamped offset.
    pub fn set_cursor(&self, offset: u64) -> u64 {
        self.editor().set_cursor(offset as usize) as u64
    }

    pub fn get_cursor(&self) -> u64 {
        self.editor().cursor() as u64
    }

    pub fn set_mode(&self, mode: ModeDto) {
        self.editor().set_mode(mode.into());
    }

    /// Never fails: falls back to the creation-time mode if the editor state
    /// cannot be read.
    pub fn get_mode(&self) -> ModeDto {
        match self.inner.lock() {
            Ok(editor) => editor.mode().into(),
            Err(_) => {
                log::warn!("editor state unavailable, reporting default mode");
                self.default_mode
            }
        }
    }

    pub fn cycle_mode(&self) -> ModeDto {
        self.editor().cycle_mode().into()
    }

    pub fn get_theme(&self) -> ThemeDto {
        self.editor().theme().into()
    }

    pub fn set_theme(&self, theme: ThemeDto) {
        self.editor().set_theme(theme.into());
    }

    /// Current annotation set, sorted by start offset.
    pub fn get_decorations(&self) -> DecorationsDto {
        let editor = self.editor();
        DecorationsDto {
            version: editor.version(),
            spans: editor
                .decorations()
                .iter()
                .map(AnnotationDto::from_engine)
                .collect(),
        }
    }

    /// Activate the wikilink at `offset`, notifying registered handlers.
    pub fn activate_at(&self, offset: u64) -> Option<String> {
        let target = self.editor().wikilink_at(offset as usize)?;
        log::debug!("wikilink activated: {target}");

        let handlers = self
            .handlers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for handler in handlers {
            handler.on_wikilink(target.clone());
        }
        Some(target)
    }

    pub fn add_wikilink_handler(&self, handler: Arc<dyn WikilinkHandler>) {
        self.handlers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(handler);
    }
}

impl EditorHandle {
    fn editor(&self) -> MutexGuard<'_, Editor> {
        // Recover from poisoned mutex (another thread panicked while holding lock)
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ============ DTOs ============

#[derive(uniffi::Record)]
pub struct DecorationsDto {
    /// Document version the spans were computed for
    pub version: u64,
    pub spans: Vec<AnnotationDto>,
}

/// One annotation span, flattened for foreign hosts.
#[derive(Debug, PartialEq, uniffi::Record)]
pub struct AnnotationDto {
    pub from: u64,
    pub to: u64,
    /// "replace" or "mark"
    pub kind: String,
    /// Widget kind for replace spans (e.g. "wikilink"), empty for marks
    pub widget: String,
    /// Widget HTML for replace spans, empty for marks
    pub html: String,
    /// Plain-text rendering of the widget, empty for marks
    pub text: String,
    /// CSS class and inline style for mark spans, empty for replaces
    pub class: String,
    pub style: String,
    /// Raw target of a wikilink widget
    pub target: Option<String>,
}

impl AnnotationDto {
    fn from_engine(span: &AnnotationSpan) -> Self {
        let (from, to) = (span.from as u64, span.to as u64);
        match &span.payload {
            Payload::Replace(widget) => Self {
                from,
                to,
                kind: "replace".to_string(),
                widget: widget.kind_name().to_string(),
                html: widget.to_html(),
                text: widget.display_text(),
                class: String::new(),
                style: String::new(),
                target: match widget {
                    Widget::WikiLink { target, .. } => Some(target.clone()),
                    _ => None,
                },
            },
            Payload::Mark(mark) => Self {
                from,
                to,
                kind: "mark".to_string(),
                widget: String::new(),
                html: String::new(),
                text: String::new(),
                class: mark.class(),
                style: mark.style().to_string(),
                target: None,
            },
        }
    }
}

// ============ Standalone Functions ============

/// Resolve a wiki-link target to a file path.
///
/// Searches the given file paths for a match (case-insensitive, with or without .md extension).
/// Returns the matching file path, or None if not found.
#[uniffi::export]
pub fn resolve_wikilink(target: String, file_paths: Vec<String>) -> Option<String> {
    livemark_engine::resolve_wikilink(&target, &file_paths).cloned()
}
