//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. A frame is
//! a pure function of the mesh and a [`FrameInput`]: nothing carries over
//! between calls to [`Engine::render`], and every call returns a freshly
//! cleared [`Frame`].
//!
//! # Pipeline
//!
//! 1. [`TransformPipeline`] maps all vertices to window space and world space
//!    and rotates all normals.
//! 2. Each face becomes a loop of [`ShadingPoint`]s and goes through the
//!    [`ScanlineRasterizer`] with the shader chosen by [`ShadingMode`].
//! 3. Pixels are depth-tested into the frame; the nearest write wins.
//!
//! With [`RenderConfig::parallel`] set, steps 1 and 2 run on the rayon pool.
//! Faces are taken in batches; each face of a batch is rasterized into its own
//! [`FragmentBuffer`] and the buffers are replayed in face order on the calling
//! thread before the next batch starts. The result is identical to the
//! sequential path, ties included, and memory is bounded by one batch.

use rayon::prelude::*;
use thiserror::Error;

use crate::camera::{Camera, ModelRotation};
use crate::config::{RenderConfig, ShadingMode};
use crate::light::{PhongMaterial, PointLight};
use crate::mesh::{Face, Mesh};
use crate::render::{
    FlatShader, Frame, FragmentBuffer, PhongShader, PixelSink, ScanlineRasterizer, ShadingPoint,
};
use crate::transform::{TransformPipeline, TransformedMesh, Viewport};

/// Faces rasterized concurrently before their fragments are replayed.
const FACES_PER_BATCH: usize = 2048;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("viewport {width}x{height} has no pixels")]
    EmptyViewport { width: u32, height: u32 },
}

/// Everything the host supplies for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub camera: Camera,
    pub rotation: ModelRotation,
    pub light: PointLight,
    pub viewport: Viewport,
}

impl FrameInput {
    /// Default camera, no rotation, light at the eye.
    pub fn new(viewport: Viewport) -> Self {
        let camera = Camera::default();
        Self {
            camera,
            rotation: ModelRotation::default(),
            light: PointLight::new(camera.eye),
            viewport,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: RenderConfig,
    material: PhongMaterial,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            material: PhongMaterial::default(),
        }
    }

    pub fn with_material(mut self, material: PhongMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    /// Renders one frame of `mesh` as seen through `input`.
    pub fn render(&self, mesh: &Mesh, input: &FrameInput) -> Result<Frame, RenderError> {
        let Viewport { width, height } = input.viewport;
        if input.viewport.is_empty() {
            return Err(RenderError::EmptyViewport { width, height });
        }

        log::debug!(
            "Rendering {} faces, {} vertices at {}x{} ({}, {})",
            mesh.faces().len(),
            mesh.vertices().len(),
            width,
            height,
            self.config.shading,
            if self.config.parallel { "parallel" } else { "sequential" },
        );

        let pipeline = TransformPipeline::new(
            &input.camera,
            mesh.scale(),
            input.rotation,
            input.viewport,
            self.config.z_near,
            self.config.z_far,
        );
        let geometry = pipeline.apply(mesh, self.config.parallel);
        let phong = PhongShader::new(
            input.light,
            input.camera.eye,
            self.config.base_color,
            self.material,
        );

        let mut frame = Frame::new(width, height, self.config.background);

        if self.config.parallel {
            let mut fb = frame.as_framebuffer();
            for batch in mesh.faces().chunks(FACES_PER_BATCH) {
                let per_face: Vec<FragmentBuffer> = batch
                    .par_iter()
                    .map_init(
                        || (ScanlineRasterizer::new(), Vec::new()),
                        |(raster, corners), face| {
                            let mut fragments = FragmentBuffer::new(width, height);
                            self.draw_face(raster, corners, face, &geometry, &phong, &mut fragments);
                            fragments
                        },
                    )
                    .collect();

                for fragments in &per_face {
                    fragments.replay(&mut fb);
                }
            }
        } else {
            let mut raster = ScanlineRasterizer::new();
            let mut corners = Vec::new();
            let mut fb = frame.as_framebuffer();
            for face in mesh.faces() {
                self.draw_face(&mut raster, &mut corners, face, &geometry, &phong, &mut fb);
            }
        }

        Ok(frame)
    }

    fn draw_face<K: PixelSink>(
        &self,
        raster: &mut ScanlineRasterizer,
        corners: &mut Vec<ShadingPoint>,
        face: &Face,
        geometry: &TransformedMesh,
        phong: &PhongShader,
        sink: &mut K,
    ) {
        corners.clear();
        for corner in face.corners() {
            let Some(window) = geometry.window[corner.vertex] else {
                log::trace!("Skipping face touching unprojectable vertex {}", corner.vertex);
                return;
            };
            corners.push(ShadingPoint::from_window(
                window,
                geometry.normals[corner.normal],
                geometry.world[corner.vertex],
            ));
        }

        match self.config.shading {
            ShadingMode::Wireframe => raster.draw_outline(corners, self.config.wireframe_color, sink),
            ShadingMode::Flat => {
                let flat = FlatShader::for_polygon(phong, corners);
                raster.fill_polygon(corners, &flat, sink);
            }
            ShadingMode::Phong => raster.fill_polygon(corners, phong, sink),
        }
    }
}
