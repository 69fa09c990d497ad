//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a view into color and depth buffers with bounds-checked,
//! depth-tested writes. The depth buffer stores projected depth (smaller is
//! nearer) and starts every frame at `+inf`.

use super::rasterizer::{PixelBounds, PixelSink};

/// Returns true if `(x, y)` lies strictly inside the buffer.
///
/// The outermost row and column on every side are never written.
#[inline]
pub fn is_writable(x: i32, y: i32, width: u32, height: u32) -> bool {
    x > 0 && (x as i64) < width as i64 && y > 0 && (y as i64) < height as i64
}

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass buffers + dimensions together.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    ///
    /// Buffer lengths must equal `width * height`.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            width as usize * height as usize,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            color_buffer.len(),
            "Depth buffer size doesn't match color buffer"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is written only inside the one-pixel border (see
    /// [`is_writable`]) and only if `depth` is strictly smaller than the stored
    /// depth. Color and depth are updated together.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) {
        if is_writable(x, y, self.width, self.height) {
            let idx = y as usize * self.width as usize + x as usize;
            if depth < self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
            }
        }
    }
}

impl PixelSink for FrameBuffer<'_> {
    #[inline]
    fn put(&mut self, x: i32, y: i32, depth: f32, color: u32) {
        self.set_pixel_with_depth(x, y, depth, color);
    }

    fn bounds(&self) -> PixelBounds {
        PixelBounds::writable(self.width, self.height)
    }
}
