//! Vertex layout shared by mesh loaders.
//!
//! Meshes are handed around as flat interleaved `f32` buffers. This module
//! defines that layout and converts typed vertices into it.

use cgmath::Point3;

/// Number of floats per vertex in an interleaved mesh buffer.
pub const VERTEX_STRIDE: usize = std::mem::size_of::<MeshVertex>() / std::mem::size_of::<f32>();

/// A single mesh vertex.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Normal: [f32; 3] (12 bytes)
///
/// Total size: 32 bytes, 8 floats
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position in model space
    pub position: [f32; 3],
    /// UV texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Unit surface normal
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Creates a new vertex.
    pub fn new(position: Point3<f32>, tex_coords: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position: position.into(),
            tex_coords,
            normal,
        }
    }
}

/// Flattens typed vertices into the interleaved `f32` layout.
pub fn interleave(vertices: &[MeshVertex]) -> Vec<f32> {
    bytemuck::cast_slice::<MeshVertex, f32>(vertices).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_eight_floats() {
        assert_eq!(VERTEX_STRIDE, 8);
    }

    #[test]
    fn interleave_keeps_position_first() {
        let vertices = [
            MeshVertex::new(Point3::new(1.0, 2.0, 3.0), [0.25, 0.75], [0.0, 1.0, 0.0]),
            MeshVertex::new(Point3::new(4.0, 5.0, 6.0), [1.0, 0.0], [0.0, 0.0, -1.0]),
        ];

        let flat = interleave(&vertices);

        assert_eq!(flat.len(), 2 * VERTEX_STRIDE);
        assert_eq!(&flat[0..3], &[1.0, 2.0, 3.0]);
        assert_eq!(&flat[3..5], &[0.25, 0.75]);
        assert_eq!(&flat[VERTEX_STRIDE..VERTEX_STRIDE + 3], &[4.0, 5.0, 6.0]);
    }
}
