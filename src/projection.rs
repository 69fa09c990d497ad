//! Perspective projection parameters.
//!
//! The [`Projection`] struct holds the perspective parameters (FOV, aspect
//! ratio, near/far planes) for one frame and generates the projection matrix.

use crate::math::mat4::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near plane distance.
    z_near: f32,
    /// Far plane distance.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near plane distance (must be > 0)
    /// * `z_far` - Far plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        if z_near <= 0.0 {
            log::warn!("Near is not positive: `{}`", z_near);
        }
        if z_far <= z_near {
            log::warn!("Far is closer than near: `{}` `{}`", z_far, z_near);
        }
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Builds the projection for a viewport of `width` x `height` pixels.
    pub fn for_viewport(fov_y: f32, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y, width as f32 / height as f32, z_near, z_far)
    }

    /// Returns the vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Returns the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Generates the right-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_fov_rh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}
