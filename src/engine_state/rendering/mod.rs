//! # Rendering Assets
//!
//! The asset side of rendering: the vertex layout shared with the GPU, mesh
//! sources and texture decoding. Block bounds are computed from the same
//! vertex buffers that would be uploaded for drawing.

pub mod mesh;
pub mod texture;
pub mod vertex;
