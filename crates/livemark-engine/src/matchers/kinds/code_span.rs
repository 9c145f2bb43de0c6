/// Code span inline type with owned delimiter constant.
///
/// The body must be non-empty and may not contain a backtick.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';
}
