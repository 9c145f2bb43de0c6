/// `$$block$$` and `$inline$` math.
pub struct Math;

impl Math {
    pub const DOLLAR: u8 = b'$';
    pub const BLOCK: &'static [u8; 2] = b"$$";
}
