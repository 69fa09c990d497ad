//! Owned color and depth buffers for one rendered frame.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::framebuffer::FrameBuffer;
use crate::colors;

/// A finished (or in-progress) frame: ARGB8888 colors plus per-pixel depth.
///
/// Both buffers are row-major with the origin at the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Frame {
    /// A cleared frame: every pixel `background`, every depth `+inf`.
    pub fn new(width: u32, height: u32, background: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![background; size],
            depth_buffer: vec![f32::INFINITY; size],
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

    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).map(|i| self.color_buffer[i])
    }

    /// Stored depth at (x, y), or None if out of bounds.
    pub fn depth(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth_buffer[i])
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }

    /// The color buffer as raw bytes, ready for an ARGB8888 streaming texture.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the
        // slice covers exactly the buffer's bytes and borrows `self`.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Converts the color buffer into an RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        let width = self.width as usize;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(colors::to_rgba_bytes(
                self.color_buffer[y as usize * width + x as usize],
            ))
        })
    }

    /// Writes the frame as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
    }
}
