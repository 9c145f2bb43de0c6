//! # Decorations
//!
//! Annotation spans and the two passes that produce them: [`line`] decorates
//! one line, [`builder`] walks the document.

pub mod builder;
pub mod line;
pub mod span;

pub use builder::{DecorationBuilder, recompute};
pub use line::{LineDecorator, MarkdownLineDecorator, decorate_inline};
pub use span::{AnnotationSpan, Mark, Payload, SpanKind};
