//! Packed ARGB8888 colors used by the renderer.

pub const BACKGROUND: u32 = 0xFF1E1E1E;
pub const GRID: u32 = 0xFF333333;
pub const FILL: u32 = 0xFF4A6FA5;
pub const WIREFRAME: u32 = 0xFFFFFFFF;
pub const VERTEX: u32 = 0xFFFF4040;

/// Splits a packed color into `[r, g, b, a]` bytes.
#[inline]
pub fn to_rgba(color: u32) -> [u8; 4] {
    let [a, r, g, b] = color.to_be_bytes();
    [r, g, b, a]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_channels() {
        assert_eq!(to_rgba(0x80112233), [0x11, 0x22, 0x33, 0x80]);
        assert_eq!(to_rgba(VERTEX), [0xFF, 0x40, 0x40, 0xFF]);
    }
}
