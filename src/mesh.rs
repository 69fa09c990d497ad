//! Polygonal mesh data and loading.
//!
//! A [`Mesh`] keeps positions and normals in separate indexed lists. Each face
//! corner references a vertex and a normal independently, the way OBJ files do.
//! All indices are 0-based and validated once in [`Mesh::new`]; the rest of the
//! pipeline indexes without further checks.

use std::io::BufRead;
use std::path::Path;

use thiserror::Error;

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Scale target used by [`Mesh::fit_scale`]: a model spans roughly this many
/// world units on its largest axis once fitted.
const FIT_EXTENT: f32 = 125.0;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read OBJ data: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("mesh has no vertices")]
    Empty,
    #[error("face {face} corner {corner}: vertex index {index} out of range (have {len})")]
    VertexIndexOutOfRange {
        face: usize,
        corner: usize,
        index: usize,
        len: usize,
    },
    #[error("face {face} corner {corner}: normal index {index} out of range (have {len})")]
    NormalIndexOutOfRange {
        face: usize,
        corner: usize,
        index: usize,
        len: usize,
    },
}

/// One polygon corner: indices into the mesh's vertex and normal lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corner {
    pub vertex: usize,
    /// Texture coordinate index, carried from the file but never sampled.
    pub texture: Option<usize>,
    pub normal: usize,
}

impl Corner {
    pub const fn new(vertex: usize, normal: usize) -> Self {
        Self {
            vertex,
            texture: None,
            normal,
        }
    }
}

/// A polygon as a closed loop of corners; the last corner connects back to the first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    corners: Vec<Corner>,
}

impl Face {
    pub fn new(corners: Vec<Corner>) -> Self {
        Self { corners }
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vec4>,
    normals: Vec<Vec3>,
    faces: Vec<Face>,
    scale: f32,
    max_coordinate: f32,
}

impl Mesh {
    /// Builds a mesh, rejecting any corner that points outside the vertex or
    /// normal list.
    pub fn new(vertices: Vec<Vec4>, normals: Vec<Vec3>, faces: Vec<Face>) -> Result<Self, LoadError> {
        if vertices.is_empty() {
            return Err(LoadError::Empty);
        }

        for (face_index, face) in faces.iter().enumerate() {
            for (corner_index, corner) in face.corners.iter().enumerate() {
                if corner.vertex >= vertices.len() {
                    return Err(LoadError::VertexIndexOutOfRange {
                        face: face_index,
                        corner: corner_index,
                        index: corner.vertex,
                        len: vertices.len(),
                    });
                }
                if corner.normal >= normals.len() {
                    return Err(LoadError::NormalIndexOutOfRange {
                        face: face_index,
                        corner: corner_index,
                        index: corner.normal,
                        len: normals.len(),
                    });
                }
            }
        }

        let max_coordinate = vertices
            .iter()
            .flat_map(|v| [v.x, v.y, v.z, v.w])
            .fold(f32::MIN, f32::max);

        Ok(Self {
            vertices,
            normals,
            faces,
            scale: 1.0,
            max_coordinate,
        })
    }

    /// An axis-aligned cube centered at the origin: 8 vertices, 6 outward
    /// normals and 6 quad faces wound counter-clockwise from outside.
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        let vertices = vec![
            Vec4::point(-h, -h, h),
            Vec4::point(h, -h, h),
            Vec4::point(h, h, h),
            Vec4::point(-h, h, h),
            Vec4::point(-h, -h, -h),
            Vec4::point(h, -h, -h),
            Vec4::point(h, h, -h),
            Vec4::point(-h, h, -h),
        ];
        let normals = vec![
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        let quads: [([usize; 4], usize); 6] = [
            ([0, 1, 2, 3], 0), // front (+Z)
            ([5, 4, 7, 6], 1), // back (-Z)
            ([1, 5, 6, 2], 2), // right
            ([4, 0, 3, 7], 3), // left
            ([3, 2, 6, 7], 4), // top
            ([4, 5, 1, 0], 5), // bottom
        ];
        let faces = quads
            .iter()
            .map(|(corners, normal)| {
                Face::new(corners.iter().map(|&v| Corner::new(v, *normal)).collect())
            })
            .collect();

        let max_coordinate = h.max(1.0);
        Self {
            vertices,
            normals,
            faces,
            scale: 1.0,
            max_coordinate,
        }
    }

    /// Loads every object in an OBJ file into a single mesh.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        log::info!("Loading mesh: {}", path.display());
        let (models, _materials) = tobj::load_obj(path, &load_options())?;
        Self::from_tobj_models(models)
    }

    /// Parses OBJ text from any buffered reader. Material libraries are ignored.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_tobj_models(models)
    }

    fn from_tobj_models(models: Vec<tobj::Model>) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let mesh = model.mesh;
            let vertex_offset = vertices.len();
            let normal_offset = normals.len();

            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec4::point(p[0], p[1], p[2])),
            );
            normals.extend(
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| Vec3::new(n[0], n[1], n[2])),
            );

            let has_normals = mesh.normal_indices.len() == mesh.indices.len();
            let has_texcoords = mesh.texcoord_indices.len() == mesh.indices.len();

            // Empty arities means every face is a triangle.
            let arities: Vec<usize> = if mesh.face_arities.is_empty() {
                vec![3; mesh.indices.len() / 3]
            } else {
                mesh.face_arities.iter().map(|&a| a as usize).collect()
            };

            let mut start = 0;
            for arity in arities {
                let range = start..start + arity;
                start += arity;

                if arity < 3 {
                    log::warn!("Skipping face in '{}' with {} corners", model.name, arity);
                    continue;
                }

                let normal_for_face = if has_normals {
                    None
                } else {
                    let points: Vec<Vec3> = mesh.indices[range.clone()]
                        .iter()
                        .filter_map(|&i| vertices.get(vertex_offset + i as usize))
                        .map(|v| v.to_vec3())
                        .collect();
                    normals.push(newell_normal(&points));
                    Some(normals.len() - 1)
                };

                let corners = range
                    .map(|i| Corner {
                        vertex: vertex_offset + mesh.indices[i] as usize,
                        texture: has_texcoords.then(|| mesh.texcoord_indices[i] as usize),
                        normal: normal_for_face.unwrap_or_else(|| {
                            normal_offset + mesh.normal_indices[i] as usize
                        }),
                    })
                    .collect();
                faces.push(Face::new(corners));
            }
        }

        log::debug!(
            "Loaded {} vertices, {} normals, {} faces",
            vertices.len(),
            normals.len(),
            faces.len()
        );
        Self::new(vertices, normals, faces)
    }

    pub fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Largest single component (x, y, z or w) over all vertices.
    pub fn max_coordinate(&self) -> f32 {
        self.max_coordinate
    }

    /// Scales the model so its largest coordinate maps to a fixed world extent.
    pub fn fit_scale(&mut self) {
        if self.max_coordinate > 0.0 {
            self.scale = FIT_EXTENT / self.max_coordinate;
        } else {
            log::warn!(
                "Max coordinate {} is not positive, keeping scale {}",
                self.max_coordinate,
                self.scale
            );
        }
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Polygon normal by Newell's method; robust for non-planar and concave loops.
fn newell_normal(points: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for (i, current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal.normalize_or_zero()
}
