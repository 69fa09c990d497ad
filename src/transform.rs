//! Model → world → view → clip → window transform chain.
//!
//! [`TransformPipeline`] is rebuilt from scratch every frame from the camera,
//! the model scale, the caller's [`ModelRotation`] and the viewport size.
//! [`TransformPipeline::apply`] maps every vertex and normal of a mesh,
//! producing arrays index-aligned with the mesh's own.
//!
//! # Order
//!
//! In row-vector notation the chain is
//! `World = Scale × RotateX × RotateY`, `Combined = World × View × Projection`,
//! followed by the perspective divide and the viewport mapping. With
//! column vectors (see [`crate::math::mat4`]) the same chain reads
//! `projection * view * rotation_y * rotation_x * scaling`.
//!
//! No clipping happens here. Window positions far outside the viewport are
//! kept; the rasterizer only walks the visible rows. A vertex whose clip-space
//! W is (nearly) zero has no usable window position and is reported as `None`,
//! which drops the polygons touching it.

use rayon::prelude::*;

use crate::camera::{Camera, ModelRotation};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;
use crate::projection::Projection;

/// Smallest number of vertices handed to one rayon task.
const MIN_VERTICES_PER_TASK: usize = 1024;

/// Clip-space W below this magnitude means the vertex lies on the camera plane.
const MIN_CLIP_W: f32 = 1e-5;

/// Largest window coordinate the integer rasterizer accepts (2^24 pixels).
/// Keeps Bresenham's error term well inside `i32`.
const MAX_WINDOW_COORD: f32 = 16_777_216.0;

/// Output surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Per-frame mesh data in the spaces the rasterizer and shader need.
///
/// Every array is index-aligned with the source mesh: `window[i]` and
/// `world[i]` belong to `mesh.vertices()[i]`, `normals[j]` to `mesh.normals()[j]`.
#[derive(Debug, Clone, Default)]
pub struct TransformedMesh {
    /// Window-space positions: pixel x, pixel y, projected depth. `None` for
    /// vertices that cannot be projected (see [`TransformPipeline::project`]).
    pub window: Vec<Option<Vec3>>,
    /// World-space positions (scaled and rotated), used for lighting.
    pub world: Vec<Vec3>,
    /// Rotated normals. Scale and translation are not applied.
    pub normals: Vec<Vec3>,
}

#[derive(Debug, Clone, Copy)]
pub struct TransformPipeline {
    world: Mat4,
    rotation: Mat4,
    combined: Mat4,
    viewport: Mat4,
}

impl TransformPipeline {
    pub fn new(
        camera: &Camera,
        scale: f32,
        rotation: ModelRotation,
        viewport: Viewport,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let rotation = rotation.matrix();
        let world = rotation * Mat4::scaling(scale);
        let view = camera.view_matrix();
        let projection =
            Projection::for_viewport(camera.fov, viewport.width, viewport.height, z_near, z_far)
                .matrix();

        Self {
            world,
            rotation,
            combined: projection * view * world,
            viewport: Mat4::viewport(viewport.width as f32, viewport.height as f32),
        }
    }

    /// Model space → window space, including the perspective divide.
    #[inline]
    pub fn to_window(&self, vertex: Vec4) -> Vec3 {
        let clip = self.combined * vertex;
        let ndc = clip / clip.w;
        (self.viewport * ndc).to_vec3()
    }

    /// Like [`Self::to_window`], but `None` when the clip-space W is near zero
    /// or the result is not a finite position the rasterizer can address.
    #[inline]
    pub fn project(&self, vertex: Vec4) -> Option<Vec3> {
        let clip = self.combined * vertex;
        if !(clip.w.abs() >= MIN_CLIP_W) {
            return None;
        }
        let window = (self.viewport * (clip / clip.w)).to_vec3();
        let addressable = window.x.abs() <= MAX_WINDOW_COORD
            && window.y.abs() <= MAX_WINDOW_COORD
            && window.z.is_finite();
        addressable.then_some(window)
    }

    /// Model space → world space.
    #[inline]
    pub fn to_world(&self, vertex: Vec4) -> Vec3 {
        (self.world * vertex).to_vec3_perspective()
    }

    /// Rotates a model-space normal into world space.
    #[inline]
    pub fn rotate_normal(&self, normal: Vec3) -> Vec3 {
        self.rotation.transform_direction(normal)
    }

    /// Transforms every vertex and normal of `mesh`.
    pub fn apply(&self, mesh: &Mesh, parallel: bool) -> TransformedMesh {
        if parallel {
            let (window, world) = mesh
                .vertices()
                .par_iter()
                .with_min_len(MIN_VERTICES_PER_TASK)
                .map(|&v| (self.project(v), self.to_world(v)))
                .unzip();
            let normals = mesh
                .normals()
                .par_iter()
                .with_min_len(MIN_VERTICES_PER_TASK)
                .map(|&n| self.rotate_normal(n))
                .collect();
            TransformedMesh {
                window,
                world,
                normals,
            }
        } else {
            let (window, world) = mesh
                .vertices()
                .iter()
                .map(|&v| (self.project(v), self.to_world(v)))
                .unzip();
            let normals = mesh
                .normals()
                .iter()
                .map(|&n| self.rotate_normal(n))
                .collect();
            TransformedMesh {
                window,
                world,
                normals,
            }
        }
    }
}
