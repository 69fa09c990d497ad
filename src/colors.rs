//! Color constants and packing helpers.
//!
//! Colors are stored as ARGB8888 `u32` values (`0xAARRGGBB`), the layout the
//! display surface consumes directly. Lighting math works on [`Vec3`] channels
//! in the `0.0..=255.0` range.

use crate::math::vec3::Vec3;

/// Cleared frame color: a light gray-white.
pub const BACKGROUND: u32 = 0xFFF0F0F0;
/// Material color applied to every face.
pub const BASE: u32 = 0xFF3A7BD5;
/// Color of edge pixels in wireframe mode.
pub const WIREFRAME: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;

/// Packs `0.0..=255.0` channels into an opaque ARGB color, clamping each channel.
#[inline]
pub fn pack_rgb(rgb: Vec3) -> u32 {
    let c = rgb.clamp(0.0, 255.0);
    0xFF00_0000 | ((c.x as u32) << 16) | ((c.y as u32) << 8) | (c.z as u32)
}

/// Unpacks an ARGB color into `0.0..=255.0` channels, dropping alpha.
#[inline]
pub fn unpack_rgb(color: u32) -> Vec3 {
    Vec3::new(
        ((color >> 16) & 0xFF) as f32,
        ((color >> 8) & 0xFF) as f32,
        (color & 0xFF) as f32,
    )
}

/// Splits an ARGB color into `[r, g, b, a]` bytes.
#[inline]
pub fn to_rgba_bytes(color: u32) -> [u8; 4] {
    [
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
        (color >> 24) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_keeps_channels() {
        assert_eq!(pack_rgb(unpack_rgb(BASE)), BASE);
    }

    #[test]
    fn pack_clamps_out_of_range_channels() {
        assert_eq!(pack_rgb(Vec3::new(300.0, -20.0, 128.4)), 0xFFFF0080);
    }

    #[test]
    fn rgba_bytes_reorder_channels() {
        assert_eq!(to_rgba_bytes(0x80112233), [0x11, 0x22, 0x33, 0x80]);
    }
}
