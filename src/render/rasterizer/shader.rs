//! Pixel shaders for polygon rasterization.
//!
//! The rasterizer decides *which* pixels a polygon covers and interpolates
//! their attributes; a [`PixelShader`] decides *what color* each gets.
//!
//! # Lighting
//!
//! [`PhongShader`] evaluates ambient + diffuse + specular terms per pixel.
//! With `L` the unit direction from the light to the surface point, `N` the
//! unit normal and `V` the unit direction from the point to the eye:
//!
//! ```text
//! diffuse  = kd * max(N · -L, 0) * base
//! R        = reflect(L, N)            // outgoing mirror direction
//! specular = ks * max(R · V, 0)^n * white
//! ambient  = ka * base
//! ```
//!
//! Surfaces whose normal faces the light receive diffuse light; a highlight
//! appears where the mirror direction points at the eye. A point facing away
//! from the light (`N · -L <= 0`) gets ambient light only.

use super::ShadingPoint;
use crate::colors::{pack_rgb, unpack_rgb};
use crate::light::{PhongMaterial, PointLight};
use crate::math::vec3::Vec3;

/// Trait for per-pixel shading computations.
pub trait PixelShader {
    /// Compute the color for one interpolated point.
    fn shade(&self, point: &ShadingPoint) -> u32;
}

/// Per-pixel Phong lighting with a single point light.
#[derive(Debug, Clone, Copy)]
pub struct PhongShader {
    light: PointLight,
    eye: Vec3,
    base: Vec3,
    material: PhongMaterial,
}

impl PhongShader {
    pub fn new(light: PointLight, eye: Vec3, base_color: u32, material: PhongMaterial) -> Self {
        Self {
            light,
            eye,
            base: unpack_rgb(base_color),
            material,
        }
    }

    /// Unclamped lit color in `0..=255` channel units.
    pub fn lighting(&self, normal: Vec3, world: Vec3) -> Vec3 {
        let m = &self.material;
        let normal = normal.normalize_or_zero();
        let to_surface = self.light.direction_to(world);
        let to_eye = (self.eye - world).normalize_or_zero();

        let diffuse = normal.dot(-to_surface).max(0.0);
        // reflect() is blind to the normal's sign; only the lit side gets a highlight.
        let specular = if diffuse > 0.0 {
            let reflected = to_surface.reflect(normal).normalize_or_zero();
            reflected.dot(to_eye).max(0.0).powi(m.shininess)
        } else {
            0.0
        };

        self.base * m.ambient + self.base * (m.diffuse * diffuse) + Vec3::splat(255.0 * m.specular * specular)
    }
}

impl PixelShader for PhongShader {
    #[inline]
    fn shade(&self, point: &ShadingPoint) -> u32 {
        pack_rgb(self.lighting(point.normal, point.world))
    }
}

/// Flat shader - returns a constant color for all pixels.
///
/// The color is lit once per polygon at the average of its corners.
#[derive(Debug, Clone, Copy)]
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }

    /// Lights the polygon once, at its mean corner position and normal.
    pub fn for_polygon(phong: &PhongShader, corners: &[ShadingPoint]) -> Self {
        if corners.is_empty() {
            return Self::new(pack_rgb(phong.base * phong.material.ambient));
        }
        let n = corners.len() as f32;
        let (normal, world) = corners
            .iter()
            .fold((Vec3::ZERO, Vec3::ZERO), |(n, w), c| (n + c.normal, w + c.world));
        Self::new(pack_rgb(phong.lighting(normal / n, world / n)))
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _point: &ShadingPoint) -> u32 {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BASE, WHITE};
    use approx::assert_relative_eq;

    fn shader_with_light_at(light: Vec3) -> PhongShader {
        PhongShader::new(
            PointLight::new(light),
            Vec3::new(0.0, 0.0, 100.0),
            BASE,
            PhongMaterial::default(),
        )
    }

    #[test]
    fn head_on_light_gives_full_intensity() {
        let shader = shader_with_light_at(Vec3::new(0.0, 0.0, 100.0));
        let lit = shader.lighting(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO);
        let base = unpack_rgb(BASE);
        // ambient 0.3 + diffuse 0.7 + specular 0.3 * 255
        assert_relative_eq!(lit.x, base.x + 76.5, epsilon = 1e-3);
        assert_relative_eq!(lit.z, base.z + 76.5, epsilon = 1e-3);
    }

    #[test]
    fn surface_facing_away_gets_ambient_only() {
        let shader = shader_with_light_at(Vec3::new(0.0, 0.0, 100.0));
        let lit = shader.lighting(Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO);
        let base = unpack_rgb(BASE);
        assert_relative_eq!(lit.y, base.y * 0.3, epsilon = 1e-3);
    }

    #[test]
    fn back_side_seen_from_light_gets_no_highlight() {
        // Eye and light on the same side, normal pointing away from both:
        // the mirror direction would hit the eye if the side were ignored.
        let shader = shader_with_light_at(Vec3::new(0.0, 0.0, 100.0));
        let lit = shader.lighting(Vec3::new(0.0, 0.0, -1.0), Vec3::new(5.0, -3.0, 0.0));
        let base = unpack_rgb(BASE);
        assert_relative_eq!(lit.x, base.x * 0.3, epsilon = 1e-3);
        assert_relative_eq!(lit.z, base.z * 0.3, epsilon = 1e-3);
    }

    #[test]
    fn off_axis_highlight_fades() {
        let shader = shader_with_light_at(Vec3::new(0.0, 0.0, 100.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let center = shader.lighting(normal, Vec3::ZERO);
        let side = shader.lighting(normal, Vec3::new(60.0, 0.0, 0.0));
        assert!(center.x > side.x);
        // Specular at ~62 degrees off the mirror direction is negligible.
        let base = unpack_rgb(BASE);
        let expected_diffuse = 0.7 * base.x * (100.0 / (100.0f32.powi(2) + 60.0f32.powi(2)).sqrt());
        assert_relative_eq!(side.x, 0.3 * base.x + expected_diffuse, epsilon = 0.5);
    }

    #[test]
    fn shade_clamps_channels() {
        let shader = PhongShader::new(
            PointLight::new(Vec3::new(0.0, 0.0, 100.0)),
            Vec3::new(0.0, 0.0, 100.0),
            WHITE,
            PhongMaterial::default(),
        );
        let p = ShadingPoint::new(0, 0, 0.5, Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO);
        assert_eq!(shader.shade(&p), WHITE);
    }

    #[test]
    fn flat_shader_is_constant() {
        let phong = shader_with_light_at(Vec3::new(0.0, 0.0, 100.0));
        let corners = [
            ShadingPoint::new(0, 0, 0.5, Vec3::new(0.0, 0.0, 1.0), Vec3::new(-1.0, 0.0, 0.0)),
            ShadingPoint::new(9, 0, 0.5, Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
            ShadingPoint::new(4, 9, 0.5, Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
        ];
        let flat = FlatShader::for_polygon(&phong, &corners);
        assert_eq!(flat.shade(&corners[0]), flat.shade(&corners[2]));
        assert_eq!(
            flat.shade(&corners[0]),
            pack_rgb(phong.lighting(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0 / 3.0, 0.0)))
        );
    }
}
