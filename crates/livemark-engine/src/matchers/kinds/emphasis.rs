/// `**strong**`.
pub struct Strong;

impl Strong {
    pub const DELIM: &'static [u8; 2] = b"**";
    /// Byte excluded from the body.
    pub const STAR: u8 = b'*';
}

/// `*emphasis*`, never adjacent to another `*`.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
}

/// `~~strikethrough~~`.
pub struct Strikethrough;

impl Strikethrough {
    pub const DELIM: &'static [u8; 2] = b"~~";
    pub const TILDE: u8 = b'~';
}
