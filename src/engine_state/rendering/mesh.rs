//! # Mesh Loading
//!
//! Mesh sources that produce interleaved vertex buffers in the
//! [`VERTEX_STRIDE`](super::vertex::VERTEX_STRIDE) layout.
//!
//! The path [`BUILTIN_CUBE`] produces a generated textured cube;
//! anything else is read as a Wavefront OBJ file relative to the asset root.

use std::path::PathBuf;

use cgmath::Point3;

use super::vertex::{interleave, MeshVertex};
use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::error::AssetError;

/// Mesh path of the generated cube with half extent 1.
pub const BUILTIN_CUBE: &str = "builtin:cube";

/// Produces the vertex buffer for a mesh path.
pub trait MeshLoader {
    /// Loads the mesh at `path` as an interleaved vertex buffer.
    fn load_mesh(&self, path: &str) -> Result<Vec<f32>, AssetError>;
}

/// Loads built-in meshes and OBJ files from disk.
#[derive(Debug, Clone, Default)]
pub struct DefaultMeshLoader {
    /// Directory OBJ paths are resolved against
    pub asset_root: PathBuf,
}

impl DefaultMeshLoader {
    /// Creates a loader resolving relative paths against `asset_root`.
    pub fn new<P: Into<PathBuf>>(asset_root: P) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }
}

impl MeshLoader for DefaultMeshLoader {
    fn load_mesh(&self, path: &str) -> Result<Vec<f32>, AssetError> {
        if path == BUILTIN_CUBE {
            return Ok(interleave(&cube_vertices(1.0)));
        }

        let full_path = self.asset_root.join(path);
        log::debug!("Loading OBJ mesh {:?}", full_path);
        load_obj_vertices(&full_path).map_err(|reason| AssetError::MeshLoad {
            path: path.to_string(),
            reason,
        })
    }
}

/// Corners of one cube face on a cube of half extent 1, counter-clockwise
/// when seen from outside.
fn face_corners(side: BlockSide) -> [[f32; 3]; 4] {
    match side {
        BlockSide::LEFT => [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
        BlockSide::RIGHT => [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]],
        BlockSide::BOTTOM => [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
        BlockSide::TOP => [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
        BlockSide::BACK => [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]],
        BlockSide::FRONT => [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
    }
}

/// Generates a textured cube centered on the origin as 12 triangles.
pub fn cube_vertices(half_extent: f32) -> Vec<MeshVertex> {
    const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 0, 2, 3];

    let mut vertices = Vec::with_capacity(36);
    for side in BlockSide::all() {
        let corners = face_corners(side);
        let normal: [f32; 3] = side.normal().into();

        for corner in QUAD_TRIANGLES {
            let [x, y, z] = corners[corner];
            vertices.push(MeshVertex::new(
                Point3::new(x * half_extent, y * half_extent, z * half_extent),
                QUAD_UVS[corner],
                normal,
            ));
        }
    }

    vertices
}

/// Reads an OBJ file into an interleaved buffer, triangulated and
/// single-indexed. Missing texture coordinates or normals are zero-filled.
fn load_obj_vertices(path: &std::path::Path) -> Result<Vec<f32>, String> {
    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &load_options).map_err(|e| e.to_string())?;

    let mut vertices = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        for &index in &mesh.indices {
            let i = index as usize;
            let position = mesh
                .positions
                .get(3 * i..3 * i + 3)
                .ok_or_else(|| format!("index {} out of range in {}", i, model.name))?;
            let tex_coords = mesh.texcoords.get(2 * i..2 * i + 2).unwrap_or(&[0.0f32, 0.0][..]);
            let normal = mesh.normals.get(3 * i..3 * i + 3).unwrap_or(&[0.0f32, 0.0, 0.0][..]);

            vertices.push(MeshVertex {
                position: [position[0], position[1], position[2]],
                tex_coords: [tex_coords[0], tex_coords[1]],
                normal: [normal[0], normal[1], normal[2]],
            });
        }
    }

    Ok(interleave(&vertices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::vertex::VERTEX_STRIDE;
    use crate::engine_state::spatial::aabb::compute_local_aabb;

    #[test]
    fn builtin_cube_spans_unit_half_extent() {
        let vertices = DefaultMeshLoader::default().load_mesh(BUILTIN_CUBE).unwrap();

        assert_eq!(vertices.len(), 36 * VERTEX_STRIDE);
        let aabb = compute_local_aabb(&vertices, VERTEX_STRIDE).unwrap();
        assert_eq!(aabb.min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn cube_normals_match_their_faces() {
        let vertices = cube_vertices(0.5);
        for (face, chunk) in vertices.chunks(6).enumerate() {
            let side = BlockSide::from_index(face as u8).unwrap();
            let normal: [f32; 3] = side.normal().into();
            for vertex in chunk {
                assert_eq!(vertex.normal, normal);
                assert_eq!(vertex.position[side.axis()], side.normal()[side.axis()] * 0.5);
            }
        }
    }

    #[test]
    fn obj_files_are_flattened() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tri.obj"),
            "v 0 0 0\nv 2 0 0\nv 0 3 -1\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\nf 1/1/1 2/2/1 3/3/1\n",
        )
        .unwrap();

        let vertices = DefaultMeshLoader::new(dir.path()).load_mesh("tri.obj").unwrap();

        assert_eq!(vertices.len(), 3 * VERTEX_STRIDE);
        let aabb = compute_local_aabb(&vertices, VERTEX_STRIDE).unwrap();
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(aabb.max, Point3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn missing_obj_is_an_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DefaultMeshLoader::new(dir.path()).load_mesh("missing.obj");

        assert!(matches!(result, Err(AssetError::MeshLoad { path, .. }) if path == "missing.obj"));
    }
}
