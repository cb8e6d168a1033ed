//! # Block Module
//!
//! Block type definitions and face handling.
//!
//! Block types come from an externally supplied catalog of mesh/texture path
//! pairs. Before a block type can be placed its assets are loaded once and
//! reduced to a `BlockPrototype`: the local bounds of its mesh plus proof that
//! its texture decodes.

use serde::{Deserialize, Serialize};

use crate::engine_state::rendering::{
    mesh::MeshLoader,
    texture::{TextureInfo, TextureLoader},
    vertex::VERTEX_STRIDE,
};
use crate::engine_state::spatial::aabb::{compute_local_aabb, Aabb};
use crate::error::AssetError;

pub mod block_side;

/// One entry of the block catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTypeEntry {
    /// Mesh path understood by the session's `MeshLoader`
    pub mesh: String,
    /// Texture path understood by the session's `TextureLoader`
    pub texture: String,
}

impl BlockTypeEntry {
    /// Creates an entry from a mesh path and a texture path.
    pub fn new<M: Into<String>, T: Into<String>>(mesh: M, texture: T) -> Self {
        Self {
            mesh: mesh.into(),
            texture: texture.into(),
        }
    }
}

/// The loaded, ready-to-place form of a block type.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPrototype {
    /// Bounds of the mesh in model space
    pub local_aabb: Aabb,
    /// Number of vertices in the mesh
    pub vertex_count: usize,
    /// The decoded texture
    pub texture: TextureInfo,
}

/// Ordered list of placeable block types with lazily loaded prototypes.
///
/// A failed load is not cached, so a later placement retries it.
#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    entries: Vec<BlockTypeEntry>,
    prototypes: Vec<Option<BlockPrototype>>,
}

impl BlockCatalog {
    /// Creates a catalog with nothing loaded yet.
    pub fn new(entries: Vec<BlockTypeEntry>) -> Self {
        let prototypes = vec![None; entries.len()];
        Self {
            entries,
            prototypes,
        }
    }

    /// Number of block types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no block types.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured paths of a block type.
    pub fn entry(&self, index: usize) -> Option<&BlockTypeEntry> {
        self.entries.get(index)
    }

    /// Returns the prototype for block type `index`, loading it on first use.
    ///
    /// # Errors
    /// * `AssetError::UnknownBlockType` if `index` is outside the catalog
    /// * `AssetError::MeshLoad` / `AssetError::TextureLoad` if an asset fails to load
    /// * `AssetError::DegenerateMesh` if the mesh has no usable bounds
    pub fn prototype(
        &mut self,
        index: usize,
        mesh_loader: &dyn MeshLoader,
        texture_loader: &dyn TextureLoader,
    ) -> Result<&BlockPrototype, AssetError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get(index)
            .ok_or(AssetError::UnknownBlockType { index, len })?;

        if self.prototypes[index].is_none() {
            let prototype = load_prototype(entry, mesh_loader, texture_loader)?;
            log::info!(
                "Loaded block type {} ({} vertices, {}x{} texture)",
                index,
                prototype.vertex_count,
                prototype.texture.width,
                prototype.texture.height
            );
            self.prototypes[index] = Some(prototype);
        }

        self.prototypes[index]
            .as_ref()
            .ok_or(AssetError::UnknownBlockType { index, len })
    }
}

fn load_prototype(
    entry: &BlockTypeEntry,
    mesh_loader: &dyn MeshLoader,
    texture_loader: &dyn TextureLoader,
) -> Result<BlockPrototype, AssetError> {
    let vertices = mesh_loader.load_mesh(&entry.mesh)?;
    let local_aabb =
        compute_local_aabb(&vertices, VERTEX_STRIDE).map_err(|source| AssetError::DegenerateMesh {
            path: entry.mesh.clone(),
            source,
        })?;
    let texture = texture_loader.load_texture(&entry.texture)?;

    Ok(BlockPrototype {
        local_aabb,
        vertex_count: vertices.len() / VERTEX_STRIDE,
        texture,
    })
}
