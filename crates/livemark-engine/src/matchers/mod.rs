//! # Pattern matchers
//!
//! Per-construct recognisers. [`block`] decides what a whole line is;
//! [`inline`] finds span-level constructs inside it. Both are pure functions
//! of the line text and its start offset.

pub mod block;
pub mod callout;
pub mod cursor;
pub mod inline;
pub mod kinds;

pub use block::{LineConstruct, MarkdownLineClassifier};
pub use callout::CalloutKind;
pub use inline::InlineMatch;
