//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! A row-vector chain such as `World × View × Projection` is therefore written
//! here as `projection * view * world`. Both produce the same points.
//!
//! All constructors are right-handed: the camera looks down -Z in view space
//! and projected depth lands in `[0, 1]` between the near and far planes.

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a uniform scale matrix.
    pub fn scaling(s: f32) -> Self {
        Mat4::new([
            [s, 0.0, 0.0, 0.0],
            [0.0, s, 0.0, 0.0],
            [0.0, 0.0, s, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis (counter-clockwise looking
    /// down the axis towards the origin).
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed perspective projection from a vertical field of view.
    ///
    /// Clip-space W equals the view-space distance in front of the camera
    /// (`-z_view`), and `z / w` maps `near..far` onto `0..1`.
    pub fn perspective_fov_rh(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let y_scale = 1.0 / (fov_y / 2.0).tan();
        let x_scale = y_scale / aspect_ratio;
        let range = near - far;
        Mat4::new([
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [0.0, 0.0, far / range, near * far / range],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Creates a right-handed view matrix.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The up direction of the camera.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let back = (eye - target).normalize();
        let right = up.cross(back).normalize();
        let up = back.cross(right);

        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [back.x, back.y, back.z, -back.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Maps normalized device coordinates onto a `width` x `height` pixel grid.
    ///
    /// X grows to the right, Y is flipped so that the origin sits at the
    /// top-left corner, Z passes through unscaled.
    pub fn viewport(width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Mat4::new([
            [half_w, 0.0, 0.0, half_w],
            [0.0, -half_h, 0.0, half_h],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transforms a direction (w = 0): translation is ignored.
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(v, 0.0)).to_vec3()
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out_row) in result.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x + self.data[r][1] * v.y + self.data[r][2] * v.z + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn rotation_x_turns_y_into_z() {
        let rotated = Mat4::rotation_x(FRAC_PI_2).transform_direction(Vec3::UP);
        assert_vec3_eq(rotated, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn rotation_y_turns_z_into_x() {
        let rotated = Mat4::rotation_y(FRAC_PI_2).transform_direction(Vec3::new(0.0, 0.0, 1.0));
        assert_vec3_eq(rotated, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn look_at_puts_target_on_negative_z() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
        let origin = (view * Vec4::point(0.0, 0.0, 0.0)).to_vec3();
        assert_vec3_eq(origin, Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_range() {
        let proj = Mat4::perspective_fov_rh(1.0, 1.0, 0.1, 1900.0);
        let near = proj * Vec4::point(0.0, 0.0, -0.1);
        let far = proj * Vec4::point(0.0, 0.0, -1900.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
        assert_relative_eq!(near.w, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn viewport_flips_y() {
        let vp = Mat4::viewport(200.0, 100.0);
        let top_left = (vp * Vec4::point(-1.0, 1.0, 0.5)).to_vec3();
        assert_vec3_eq(top_left, Vec3::new(0.0, 0.0, 0.5));
        let center = (vp * Vec4::point(0.0, 0.0, 0.0)).to_vec3();
        assert_vec3_eq(center, Vec3::new(100.0, 50.0, 0.0));
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::rotation_x(0.3) * Mat4::scaling(2.0);
        assert_eq!(m * Mat4::identity(), m);
    }
}
