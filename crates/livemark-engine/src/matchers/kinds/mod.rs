//! # Inline Kinds
//!
//! Inline constructs own their delimiter constants. The scanners in
//! [`super::inline`] refer to these; they never hardcode `**` or `[[`.

pub mod code_span;
pub mod emphasis;
pub mod link;
pub mod math;
pub mod wikilink;

pub use code_span::CodeSpan;
pub use emphasis::{Emphasis, Strikethrough, Strong};
pub use link::{Image, Link};
pub use math::Math;
pub use wikilink::WikiLink;
