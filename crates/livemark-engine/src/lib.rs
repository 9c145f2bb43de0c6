pub mod decorations;
pub mod editor;
pub mod error;
pub mod matchers;
pub mod mode;
pub mod text;
pub mod tracker;
pub mod widgets;
pub mod wikilink;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use decorations::{AnnotationSpan, DecorationBuilder, Mark, Payload, SpanKind, recompute};
pub use editor::{Editor, EditorOptions, WikilinkListener};
pub use error::{DecorateError, EngineError, ParseModeError, ParseThemeError};
pub use matchers::CalloutKind;
pub use mode::{DisplayMode, Theme};
pub use text::DocumentSnapshot;
pub use tracker::{LivePreview, Update};
pub use widgets::Widget;
pub use wikilink::resolve_wikilink;
