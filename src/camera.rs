//! Look-at camera and the model orbit angles supplied by the host.
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive towards the viewer (the camera looks down -Z in view space)
//!
//! Orbiting does not move the camera. The host accumulates [`ModelRotation`]
//! angles and the pipeline folds them into the world matrix every frame.

use std::f32::consts::FRAC_PI_3;

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Radians of rotation per pixel of mouse drag.
const DRAG_RADIANS_PER_PIXEL: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
}

impl Default for Camera {
    /// Camera 500 units in front of the origin, looking at it with a 60° field of view.
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 500.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: FRAC_PI_3,
        }
    }
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3, fov: f32) -> Self {
        Self {
            eye,
            target,
            up,
            fov,
        }
    }

    /// Computes the view matrix for the rendering pipeline.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Cumulative model rotation in radians, owned by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelRotation {
    /// Rotation about the X axis (pitch).
    pub x: f32,
    /// Rotation about the Y axis (yaw).
    pub y: f32,
}

impl ModelRotation {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Adds a delta rotation.
    pub fn rotate(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.x += dx;
        self.y += dy;
        self
    }

    /// Applies a mouse drag: horizontal movement spins around Y, vertical
    /// movement (positive = up) tilts around X.
    pub fn drag(&mut self, dx_pixels: i32, dy_pixels: i32) -> &mut Self {
        self.rotate(
            dy_pixels as f32 * DRAG_RADIANS_PER_PIXEL,
            dx_pixels as f32 * DRAG_RADIANS_PER_PIXEL,
        )
    }

    /// The rotation-only part of the world transform, also applied to normals.
    ///
    /// Row-vector order `RotateX × RotateY`: X is applied first, then Y.
    pub fn matrix(&self) -> Mat4 {
        Mat4::rotation_y(self.y) * Mat4::rotation_x(self.x)
    }
}
