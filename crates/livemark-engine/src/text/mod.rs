//! # Document Text
//!
//! Read-only access to the host's text storage (an `xi_rope::Rope`).
//!
//! - **`span`**: `Span` byte range used by every recognised construct
//! - **`lines`**: `lines_with_spans()` walks the rope line by line
//! - **`snapshot`**: `DocumentSnapshot`, the per-pass immutable view the
//!   decoration builder reads from

pub mod lines;
pub mod snapshot;
pub mod span;

pub use lines::{LineRef, lines_with_spans};
pub use snapshot::DocumentSnapshot;
pub use span::Span;
