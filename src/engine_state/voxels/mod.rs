//! # Voxels Module
//!
//! Block types and the store of placed blocks.

pub mod block;
pub mod world;
pub mod world_object;
