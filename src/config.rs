//! Per-engine rendering options.

use crate::colors;

/// How polygons are turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Polygon outlines only, in the wireframe color.
    Wireframe,
    /// One lit color per polygon, evaluated at the average of its corners.
    Flat,
    /// Lighting evaluated for every pixel from interpolated normals.
    #[default]
    Phong,
}

impl std::fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadingMode::Wireframe => write!(f, "Wireframe"),
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Phong => write!(f, "Phong"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub background: u32,
    pub base_color: u32,
    pub wireframe_color: u32,
    pub shading: ShadingMode,
    pub z_near: f32,
    pub z_far: f32,
    /// Spread vertex transform and polygon rasterization over the rayon pool.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: colors::BACKGROUND,
            base_color: colors::BASE,
            wireframe_color: colors::WIREFRAME,
            shading: ShadingMode::default(),
            z_near: 0.1,
            z_far: 1900.0,
            parallel: true,
        }
    }
}

impl RenderConfig {
    pub fn with_shading(mut self, shading: ShadingMode) -> Self {
        self.shading = shading;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_background(mut self, color: u32) -> Self {
        self.background = color;
        self
    }

    pub fn with_base_color(mut self, color: u32) -> Self {
        self.base_color = color;
        self
    }
}
