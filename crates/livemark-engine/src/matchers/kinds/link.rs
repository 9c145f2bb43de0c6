/// `[text](url)`.
pub struct Link;

impl Link {
    pub const TEXT_OPEN: u8 = b'[';
    pub const TEXT_CLOSE: u8 = b']';
    pub const URL_OPEN: u8 = b'(';
    pub const URL_CLOSE: u8 = b')';
}

/// `![alt](src)`, a link prefixed with a bang.
pub struct Image;

impl Image {
    pub const BANG: u8 = b'!';
    /// Alt text used when the brackets are empty.
    pub const DEFAULT_ALT: &'static str = "image";
}
