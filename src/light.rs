//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A point light at a world-space position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

impl Default for PointLight {
    /// A light placed at the default camera eye.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 500.0))
    }
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Moves the light by a discrete offset, as the host does on key presses.
    pub fn step(&mut self, delta: Vec3) -> &mut Self {
        self.position += delta;
        self
    }

    /// Unit direction the light travels to reach `point` (light → surface).
    pub fn direction_to(&self, point: Vec3) -> Vec3 {
        (point - self.position).normalize_or_zero()
    }
}

/// Phong reflection coefficients shared by every face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: i32,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            ambient: 0.3,
            diffuse: 0.7,
            specular: 0.3,
            shininess: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn direction_points_from_light_to_surface() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0));
        let dir = light.direction_to(Vec3::ZERO);
        assert_relative_eq!(dir.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn step_moves_light() {
        let mut light = PointLight::new(Vec3::ZERO);
        light.step(Vec3::new(5.0, 0.0, 0.0)).step(Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(light.position, Vec3::new(5.0, -2.0, 0.0));
    }

    #[test]
    fn light_at_surface_has_no_direction() {
        let light = PointLight::new(Vec3::ONE);
        assert_eq!(light.direction_to(Vec3::ONE), Vec3::ZERO);
    }
}
