//! Scanline polygon rasterization.
//!
//! # Algorithm Overview
//!
//! Polygons of any corner count are handled the same way:
//!
//! 1. **Trace** every edge of the closed loop (including last → first) with
//!    the [edge walker](super::edge).
//! 2. **Bucket** edge points by row, keeping the leftmost and rightmost point
//!    of each row. Ties keep the point seen first.
//! 3. **Fill** each row strictly between the top and bottom rows: walk from
//!    the left point to the right point and shade every produced point.
//!
//! ```text
//!        ____*____          <- min_y: not filled
//!       *.........*
//!      *...........*        <- rows filled left -> right
//!       *.........*
//!        ‾‾‾‾*‾‾‾‾          <- max_y: not filled
//! ```
//!
//! The topmost and bottommost rows of every polygon are left untouched, and a
//! row whose left and right points coincide produces no pixels. Polygons that
//! are only one or two rows tall therefore draw nothing. No face-orientation
//! test is made: back faces are filled like front faces and the depth buffer
//! decides what stays visible.
//!
//! Polygons are not clipped. Only rows and columns inside the sink's
//! [`PixelBounds`] are bucketed and walked, so a corner far off screen costs
//! one long edge walk and nothing more.

use std::ops::Range;

use super::edge::for_each_point;
use super::shader::PixelShader;
use super::{PixelBounds, PixelSink, ShadingPoint};

/// Scanline-based polygon rasterizer.
///
/// Holds a row buffer that is reused between polygons, so one instance
/// should be kept per thread.
#[derive(Debug, Default)]
pub struct ScanlineRasterizer {
    rows: Vec<Option<(ShadingPoint, ShadingPoint)>>,
}

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the polygon outline in a single color.
    pub fn draw_outline<K: PixelSink>(&self, corners: &[ShadingPoint], color: u32, sink: &mut K) {
        let PixelBounds { columns, rows } = sink.bounds();
        for_each_edge_point(corners, |p| {
            if columns.contains(&p.x) && rows.contains(&p.y) {
                sink.put(p.x, p.y, p.z, color);
            }
        });
    }

    /// Fills the polygon, shading every interior point.
    pub fn fill_polygon<S, K>(&mut self, corners: &[ShadingPoint], shader: &S, sink: &mut K)
    where
        S: PixelShader + ?Sized,
        K: PixelSink,
    {
        let Some(min_y) = corners.iter().map(|c| c.y).min() else {
            return;
        };
        let Some(max_y) = corners.iter().map(|c| c.y).max() else {
            return;
        };

        // Open interval (min_y, max_y), cut down to the rows the sink accepts.
        let PixelBounds { columns, rows } = sink.bounds();
        let first = min_y.saturating_add(1).max(rows.start);
        let end = max_y.min(rows.end);
        if first >= end {
            return;
        }

        self.bucket_rows(corners, first..end);

        for row in &self.rows {
            let Some((left, right)) = row else {
                continue;
            };
            let Some((start, stop)) = clip_span(left, right, &columns) else {
                continue;
            };
            for_each_point(&start, &stop, |p| sink.put(p.x, p.y, p.z, shader.shade(p)));
        }
    }

    /// Collects the (leftmost, rightmost) edge point of every row in `span`.
    fn bucket_rows(&mut self, corners: &[ShadingPoint], span: Range<i32>) {
        let first = span.start;
        self.rows.clear();
        self.rows.resize((i64::from(span.end) - i64::from(first)) as usize, None);

        let rows = &mut self.rows;
        for_each_edge_point(corners, |p| {
            if !span.contains(&p.y) {
                return;
            }
            let slot = &mut rows[(i64::from(p.y) - i64::from(first)) as usize];
            match slot {
                None => *slot = Some((*p, *p)),
                Some((left, right)) => {
                    if p.x < left.x {
                        *left = *p;
                    }
                    if p.x > right.x {
                        *right = *p;
                    }
                }
            }
        });
    }
}

/// Visits the points of every edge of the closed loop, edge by edge.
fn for_each_edge_point<F: FnMut(&ShadingPoint)>(corners: &[ShadingPoint], mut visit: F) {
    let n = corners.len();
    for i in 0..n {
        for_each_point(&corners[i], &corners[(i + 1) % n], &mut visit);
    }
}

/// Trims a row span to `columns` plus one pixel on either side. The pixels of
/// the trimmed span that fall inside `columns` are exactly those of the full
/// span. Returns `None` when none of them do.
fn clip_span(
    left: &ShadingPoint,
    right: &ShadingPoint,
    columns: &Range<i32>,
) -> Option<(ShadingPoint, ShadingPoint)> {
    let lo = left.x.max(columns.start.saturating_sub(1));
    let hi = right.x.min(columns.end);
    if lo >= hi {
        return None;
    }
    Some((at_column(left, right, lo), at_column(left, right, hi)))
}

/// The point of the span `left` → `right` at column `x`.
fn at_column(left: &ShadingPoint, right: &ShadingPoint, x: i32) -> ShadingPoint {
    if x == left.x {
        return *left;
    }
    if x == right.x {
        return *right;
    }
    let t = ((i64::from(x) - i64::from(left.x)) as f64
        / (i64::from(right.x) - i64::from(left.x)) as f64) as f32;
    ShadingPoint::new(
        x,
        left.y,
        left.z + (right.z - left.z) * t,
        left.normal + (right.normal - left.normal) * t,
        left.world + (right.world - left.world) * t,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;
    use crate::render::framebuffer::is_writable;
    use crate::render::rasterizer::{Fragment, FragmentBuffer};
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    /// Records every write without any depth test.
    #[derive(Default)]
    struct Recorder(Vec<Fragment>);

    impl PixelSink for Recorder {
        fn put(&mut self, x: i32, y: i32, depth: f32, color: u32) {
            self.0.push(Fragment { x, y, depth, color });
        }
    }

    struct Solid(u32);

    impl PixelShader for Solid {
        fn shade(&self, _point: &ShadingPoint) -> u32 {
            self.0
        }
    }

    fn corner(x: i32, y: i32) -> ShadingPoint {
        ShadingPoint::new(x, y, 0.5, Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO)
    }

    fn filled(corners: &[ShadingPoint]) -> Vec<Fragment> {
        let mut rec = Recorder::default();
        ScanlineRasterizer::new().fill_polygon(corners, &Solid(7), &mut rec);
        rec.0
    }

    #[test]
    fn square_fills_interior_rows_only() {
        let square = [corner(0, 0), corner(10, 0), corner(10, 10), corner(0, 10)];
        let frags = filled(&square);

        let rows: HashSet<i32> = frags.iter().map(|f| f.y).collect();
        assert_eq!(rows, (1..10).collect());
        // Each row spans x = 0..=10.
        assert_eq!(frags.len(), 9 * 11);
        assert!(frags.iter().all(|f| f.color == 7));
    }

    #[test]
    fn winding_does_not_matter() {
        let cw = [corner(0, 0), corner(10, 0), corner(10, 10), corner(0, 10)];
        let ccw = [corner(0, 10), corner(10, 10), corner(10, 0), corner(0, 0)];
        let a: HashSet<(i32, i32)> = filled(&cw).iter().map(|f| (f.x, f.y)).collect();
        let b: HashSet<(i32, i32)> = filled(&ccw).iter().map(|f| (f.x, f.y)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn triangle_rows_stay_within_edges() {
        let tri = [corner(0, 0), corner(20, 10), corner(0, 20)];
        for f in filled(&tri) {
            assert!(f.y > 0 && f.y < 20);
            assert!(f.x >= 0 && f.x <= 20);
        }
    }

    #[test]
    fn degenerate_polygons_do_not_panic() {
        assert!(filled(&[]).is_empty());
        assert!(filled(&[corner(3, 3)]).is_empty());
        assert!(filled(&[corner(3, 3), corner(3, 3), corner(3, 3)]).is_empty());
        assert!(filled(&[corner(0, 0), corner(9, 9)]).is_empty());
        // Flat horizontal sliver: single row, nothing strictly between.
        assert!(filled(&[corner(0, 5), corner(8, 5), corner(4, 5)]).is_empty());
        // Two rows tall: still no interior row.
        assert!(filled(&[corner(0, 5), corner(8, 5), corner(4, 6)]).is_empty());
    }

    #[test]
    fn outline_covers_every_edge() {
        let mut rec = Recorder::default();
        let square = [corner(0, 0), corner(4, 0), corner(4, 4), corner(0, 4)];
        ScanlineRasterizer::new().draw_outline(&square, 1, &mut rec);
        let pixels: HashSet<(i32, i32)> = rec.0.iter().map(|f| (f.x, f.y)).collect();
        assert_eq!(pixels.len(), 16);
        assert!(pixels.contains(&(0, 0)) && pixels.contains(&(4, 4)));
        assert!(!pixels.contains(&(2, 2)));
    }

    fn writable_pixels(frags: &[Fragment], width: u32, height: u32) -> HashSet<(i32, i32)> {
        frags
            .iter()
            .filter(|f| is_writable(f.x, f.y, width, height))
            .map(|f| (f.x, f.y))
            .collect()
    }

    #[test]
    fn bounded_fill_matches_visible_part_of_full_fill() {
        let (w, h) = (40, 30);
        let polygons = [
            vec![corner(-300, -200), corner(300, -200), corner(300, 200), corner(-300, 200)],
            vec![corner(-300, -50), corner(400, 10), corner(-20, 300)],
            vec![corner(5, 5), corner(35, 8), corner(20, 25)],
            vec![corner(-90, 12), corner(-10, 14), corner(-50, 29)],
        ];
        for polygon in &polygons {
            let expected = writable_pixels(&filled(polygon), w, h);

            let mut frags = FragmentBuffer::new(w, h);
            ScanlineRasterizer::new().fill_polygon(polygon, &Solid(7), &mut frags);
            let got: HashSet<(i32, i32)> = frags.fragments().iter().map(|f| (f.x, f.y)).collect();

            assert_eq!(got.len(), frags.fragments().len(), "pixel written twice");
            assert_eq!(got, expected, "{polygon:?}");
        }
    }

    #[test]
    fn trimmed_span_keeps_interpolated_depth() {
        let left = ShadingPoint::new(-100, 5, 0.0, Vec3::UP, Vec3::ZERO);
        let right = ShadingPoint::new(100, 5, 1.0, Vec3::UP, Vec3::ZERO);
        let (start, stop) = clip_span(&left, &right, &(1..20)).expect("overlaps");
        assert_eq!((start.x, stop.x), (0, 20));
        assert_relative_eq!(start.z, 0.5, epsilon = 1e-6);
        assert_relative_eq!(stop.z, 0.6, epsilon = 1e-6);

        assert!(clip_span(&left, &right, &(200..300)).is_none());
        assert!(clip_span(&left, &left, &(1..20)).is_none());
    }

    #[test]
    fn far_off_screen_corner_still_fills_visible_rows() {
        let (w, h) = (64, 48);
        let sliver = [corner(20, 40), corner(44, 40), corner(30, -4_000_000)];
        let mut frags = FragmentBuffer::new(w, h);
        ScanlineRasterizer::new().fill_polygon(&sliver, &Solid(3), &mut frags);

        let rows: HashSet<i32> = frags.fragments().iter().map(|f| f.y).collect();
        assert_eq!(rows, (1..40).collect());
    }

    #[test]
    fn outline_skips_points_outside_bounds() {
        let mut frags = FragmentBuffer::new(10, 10);
        ScanlineRasterizer::new().draw_outline(&[corner(-50, 5), corner(50, 5)], 1, &mut frags);
        let xs: HashSet<i32> = frags.fragments().iter().map(|f| f.x).collect();
        assert_eq!(xs, (1..10).collect());
    }

    #[test]
    fn scratch_buffers_do_not_leak_between_polygons() {
        let mut raster = ScanlineRasterizer::new();
        let mut first = Recorder::default();
        raster.fill_polygon(
            &[corner(0, 0), corner(50, 0), corner(50, 50), corner(0, 50)],
            &Solid(1),
            &mut first,
        );
        let mut second = Recorder::default();
        raster.fill_polygon(&[corner(0, 0), corner(4, 0), corner(4, 4), corner(0, 4)], &Solid(2), &mut second);
        assert_eq!(second.0.len(), 3 * 5);
    }
}
