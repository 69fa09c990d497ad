//! Small linear algebra types used by the pipeline.
//!
//! Matrices follow the column-vector convention (`Mat4 * v`). The transform
//! chain is written right-to-left accordingly, see [`crate::transform`].

pub mod mat4;
pub mod vec3;
pub mod vec4;
