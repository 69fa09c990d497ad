//! Line walking between two shading points.
//!
//! Pixel positions follow Bresenham's integer error-accumulator algorithm.
//! Depth, normal and world position advance by a constant per-step delta,
//! `(end - start) / steps`, where `steps = max(|dx|, |dy|)`. The same routine
//! traces polygon edges and fills horizontal spans.
//!
//! # Output
//!
//! A line with `steps > 0` yields `steps + 1` points, first endpoint first and
//! second endpoint last. The last point carries the exact target pixel but
//! the accumulated attributes, which may drift from the target's by float
//! rounding.
//!
//! Bresenham's tie-breaking depends on the walk direction. To make a line
//! cover the same pixels whichever way round it is requested, the walk always
//! starts at the endpoint with the smaller `(y, x)` and the result is
//! reversed when the caller asked for the other direction.
//!
//! A zero-length line (both endpoints on the same pixel) yields nothing.
//!
//! [`for_each_point`] visits the same points in walk order without storing
//! them, for callers that only keep part of a long line.

use super::ShadingPoint;

/// Appends the points of the line `from` → `to` to `out`.
pub fn interpolate_into(from: &ShadingPoint, to: &ShadingPoint, out: &mut Vec<ShadingPoint>) {
    let start = out.len();
    let reversed = for_each_point(from, to, |p| out.push(*p));
    if reversed {
        out[start..].reverse();
    }
}

/// Returns the points of the line `from` → `to`.
pub fn interpolate(from: &ShadingPoint, to: &ShadingPoint) -> Vec<ShadingPoint> {
    let mut out = Vec::new();
    interpolate_into(from, to, &mut out);
    out
}

/// Visits every point of the line between `a` and `b`, starting from the
/// endpoint with the smaller `(y, x)`.
///
/// Returns true when that endpoint is `b`, i.e. the points were visited in
/// the reverse of the requested direction. Each pixel is visited at most once.
pub fn for_each_point<F>(a: &ShadingPoint, b: &ShadingPoint, visit: F) -> bool
where
    F: FnMut(&ShadingPoint),
{
    let reversed = (b.y, b.x) < (a.y, a.x);
    if reversed {
        walk(b, a, visit);
    } else {
        walk(a, b, visit);
    }
    reversed
}

fn walk<F: FnMut(&ShadingPoint)>(from: &ShadingPoint, to: &ShadingPoint, mut visit: F) {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let steps = dx.max(dy);
    if steps == 0 {
        return;
    }

    let x_step = if from.x < to.x { 1 } else { -1 };
    let y_step = if from.y < to.y { 1 } else { -1 };

    let n = steps as f32;
    let dz = (to.z - from.z) / n;
    let d_normal = (to.normal - from.normal) / n;
    let d_world = (to.world - from.world) / n;

    let mut err = dx - dy;
    let mut current = *from;

    while current.x != to.x || current.y != to.y {
        visit(&current);

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            current.x += x_step;
        }
        if e2 < dx {
            err += dx;
            current.y += y_step;
        }

        current.z += dz;
        current.normal += d_normal;
        current.world += d_world;
    }

    visit(&current);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;
    use approx::assert_relative_eq;

    fn point(x: i32, y: i32, z: f32) -> ShadingPoint {
        ShadingPoint::new(x, y, z, Vec3::new(0.0, 0.0, 1.0), Vec3::new(x as f32, y as f32, z))
    }

    fn coords(points: &[ShadingPoint]) -> Vec<(i32, i32)> {
        points.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn zero_length_edge_is_empty() {
        let p = point(4, 7, 0.3);
        let q = point(4, 7, 0.9);
        assert!(interpolate(&p, &q).is_empty());
    }

    #[test]
    fn contains_both_endpoints() {
        let a = point(2, 3, 0.1);
        let b = point(11, -4, 0.6);
        let line = interpolate(&a, &b);
        assert_eq!(line.len(), 10);
        assert_eq!((line[0].x, line[0].y), (2, 3));
        assert_eq!((line[9].x, line[9].y), (11, -4));
    }

    #[test]
    fn steps_are_unit_moves() {
        let line = interpolate(&point(0, 0, 0.0), &point(-7, 13, 1.0));
        for pair in line.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1);
            assert!((pair[1].y - pair[0].y).abs() <= 1);
        }
    }

    #[test]
    fn reverse_direction_covers_same_pixels() {
        let ends = [-6, -1, 0, 2, 5];
        for &x0 in &ends {
            for &y0 in &ends {
                for &x1 in &ends {
                    for &y1 in &ends {
                        let a = point(x0, y0, 0.0);
                        let b = point(x1, y1, 1.0);
                        let forward = coords(&interpolate(&a, &b));
                        let mut backward = coords(&interpolate(&b, &a));
                        backward.reverse();
                        assert_eq!(forward, backward, "{:?} <-> {:?}", (x0, y0), (x1, y1));
                    }
                }
            }
        }
    }

    #[test]
    fn attributes_advance_linearly() {
        let a = point(0, 0, 0.0);
        let b = point(4, 2, 1.0);
        let line = interpolate(&a, &b);
        for (i, p) in line.iter().enumerate() {
            assert_relative_eq!(p.z, i as f32 * 0.25, epsilon = 1e-6);
            assert_relative_eq!(p.world.x, i as f32, epsilon = 1e-5);
        }
    }

    #[test]
    fn reversed_line_ends_on_exact_start_attributes() {
        let a = point(9, 9, 0.7);
        let b = point(1, 2, 0.2);
        let line = interpolate(&a, &b);
        let last = line.last().copied().unwrap();
        assert_eq!(last, b);
        assert_relative_eq!(line[0].z, 0.7, epsilon = 1e-5);
    }

    #[test]
    fn visiting_matches_collected_points() {
        let a = point(7, 12, 0.9);
        let b = point(-3, 1, 0.1);
        let mut visited = Vec::new();
        let reversed = for_each_point(&a, &b, |p| visited.push(*p));
        assert!(reversed);
        visited.reverse();
        assert_eq!(visited, interpolate(&a, &b));
    }

    #[test]
    fn appends_after_existing_points() {
        let mut out = vec![point(100, 100, 0.0)];
        interpolate_into(&point(3, 0, 0.0), &point(0, 0, 0.0), &mut out);
        assert_eq!(coords(&out), vec![(100, 100), (3, 0), (2, 0), (1, 0), (0, 0)]);
    }
}
