//! Polygon rasterization.
//!
//! The pipeline works on [`ShadingPoint`]s: integer pixel coordinates carrying
//! a depth, a normal and a world position. [`edge`] walks lines between two
//! points, [`ScanlineRasterizer`] uses it to outline and fill polygons, and
//! [`shader`] turns each point into a color. Finished pixels go to a
//! [`PixelSink`], either the frame buffer directly or a [`FragmentBuffer`]
//! that is replayed into it later.

pub mod edge;
mod scanline;
pub mod shader;

pub use scanline::ScanlineRasterizer;

use std::ops::Range;

use super::framebuffer::is_writable;
use crate::math::vec3::Vec3;

/// An interpolated sample produced while walking edges and spans.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingPoint {
    pub x: i32,
    pub y: i32,
    /// Projected depth, smaller is nearer.
    pub z: f32,
    /// Interpolated world-space normal (not renormalized).
    pub normal: Vec3,
    /// Interpolated world-space position.
    pub world: Vec3,
}

impl ShadingPoint {
    pub fn new(x: i32, y: i32, z: f32, normal: Vec3, world: Vec3) -> Self {
        Self {
            x,
            y,
            z,
            normal,
            world,
        }
    }

    /// Builds a point from a window-space position, truncating x and y to pixels.
    pub fn from_window(window: Vec3, normal: Vec3, world: Vec3) -> Self {
        Self::new(window.x as i32, window.y as i32, window.z, normal, world)
    }
}

/// Destination for depth-tested pixel writes.
pub trait PixelSink {
    fn put(&mut self, x: i32, y: i32, depth: f32, color: u32);

    /// Columns and rows a write can land in. The rasterizer skips work
    /// outside them; writes there must be ignored.
    fn bounds(&self) -> PixelBounds {
        PixelBounds::UNBOUNDED
    }
}

/// Half-open pixel ranges accepted by a [`PixelSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub columns: Range<i32>,
    pub rows: Range<i32>,
}

impl PixelBounds {
    pub const UNBOUNDED: Self = Self {
        columns: i32::MIN..i32::MAX,
        rows: i32::MIN..i32::MAX,
    };

    /// The interior of a `width` x `height` buffer; see [`is_writable`].
    pub fn writable(width: u32, height: u32) -> Self {
        let clamp = |n: u32| i32::try_from(n).unwrap_or(i32::MAX);
        Self {
            columns: 1..clamp(width),
            rows: 1..clamp(height),
        }
    }
}

/// A pixel write recorded for later replay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
    pub color: u32,
}

/// Records the writes of one polygon so it can be rasterized on a worker
/// thread and replayed into the frame buffer in polygon order.
///
/// Writes that could never land (outside the writable interior) are dropped
/// up front.
#[derive(Debug, Clone)]
pub struct FragmentBuffer {
    fragments: Vec<Fragment>,
    width: u32,
    height: u32,
}

impl FragmentBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fragments: Vec::new(),
            width,
            height,
        }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Replays every recorded write, in recording order.
    pub fn replay<S: PixelSink>(&self, sink: &mut S) {
        for f in &self.fragments {
            sink.put(f.x, f.y, f.depth, f.color);
        }
    }
}

impl PixelSink for FragmentBuffer {
    #[inline]
    fn put(&mut self, x: i32, y: i32, depth: f32, color: u32) {
        if is_writable(x, y, self.width, self.height) {
            self.fragments.push(Fragment { x, y, depth, color });
        }
    }

    fn bounds(&self) -> PixelBounds {
        PixelBounds::writable(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_window_truncates_towards_zero() {
        let p = ShadingPoint::from_window(Vec3::new(10.9, 3.2, 0.4), Vec3::UP, Vec3::ZERO);
        assert_eq!((p.x, p.y), (10, 3));
        assert_eq!(p.z, 0.4);
    }

    #[test]
    fn fragment_buffer_drops_border_writes() {
        let mut frags = FragmentBuffer::new(10, 10);
        frags.put(0, 5, 0.5, 1);
        frags.put(5, 5, 0.5, 2);
        frags.put(10, 5, 0.5, 3);
        assert_eq!(frags.fragments().len(), 1);
        assert_eq!(frags.fragments()[0].color, 2);
    }

    #[test]
    fn writable_bounds_match_write_test() {
        let bounds = PixelBounds::writable(10, 6);
        for x in -2..12 {
            for y in -2..8 {
                assert_eq!(
                    bounds.columns.contains(&x) && bounds.rows.contains(&y),
                    is_writable(x, y, 10, 6)
                );
            }
        }
    }
}
