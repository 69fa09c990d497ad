//! A CPU-based software 3D renderer.
//!
//! Meshes are transformed, scanline-rasterized and Phong-shaded entirely on
//! the CPU into a [`Frame`] holding a color buffer and a depth buffer.
//!
//! # Quick Start
//!
//! ```no_run
//! use phongrs::prelude::*;
//!
//! let mut mesh = Mesh::cube(1.0);
//! mesh.fit_scale();
//!
//! let engine = Engine::new(RenderConfig::default());
//! let frame = engine.render(&mesh, &FrameInput::new(Viewport::new(800, 600)))?;
//! frame.save_png("cube.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod transform;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use config::{RenderConfig, ShadingMode};
pub use engine::{Engine, FrameInput, RenderError};
pub use mesh::{LoadError, Mesh};
pub use render::Frame;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use phongrs::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::camera::{Camera, ModelRotation};
    pub use crate::light::{PhongMaterial, PointLight};
    pub use crate::mesh::Mesh;

    // Engine
    pub use crate::config::{RenderConfig, ShadingMode};
    pub use crate::engine::{Engine, FrameInput, RenderError};
    pub use crate::render::Frame;
    pub use crate::transform::Viewport;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::edge::interpolate;
    pub use crate::render::{
        FlatShader, FrameBuffer, PhongShader, PixelShader, ScanlineRasterizer, ShadingPoint,
    };
}
