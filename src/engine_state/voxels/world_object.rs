//! # World Objects
//!
//! A placed block: its transform, the local bounds of its mesh, and a cached
//! world-space bounding box that is refreshed whenever the transform changes.

use cgmath::{EuclideanSpace, Matrix4, Point3, Vector3};

use crate::engine_state::spatial::aabb::{compute_world_aabb, Aabb};

/// Translation plus uniform scale. Objects are never rotated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    /// World position of the object's local origin
    pub translation: Vector3<f32>,
    /// Uniform scale applied before translation
    pub scale: f32,
}

impl ObjectTransform {
    /// A transform placing an object's origin at `position`.
    pub fn at(position: Point3<f32>, scale: f32) -> Self {
        Self {
            translation: position.to_vec(),
            scale,
        }
    }

    /// The model matrix for this transform.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation) * Matrix4::from_scale(self.scale)
    }
}

/// A block instance owned by the world store.
///
/// The world bounds are private so they can only change together with the
/// transform.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    local_aabb: Aabb,
    transform: ObjectTransform,
    world_aabb: Aabb,
    /// Index into the block catalog this object was created from
    block_type: usize,
}

impl WorldObject {
    /// Creates an object and computes its world bounds.
    ///
    /// # Arguments
    /// * `local_aabb` - Bounds of the object's mesh in model space
    /// * `transform` - Where the object sits in the world
    /// * `block_type` - Catalog index of the block type
    pub fn new(local_aabb: Aabb, transform: ObjectTransform, block_type: usize) -> Self {
        Self {
            local_aabb,
            transform,
            world_aabb: compute_world_aabb(&local_aabb, &transform.to_matrix()),
            block_type,
        }
    }

    /// The object's position on the block grid.
    pub fn grid_position(&self) -> Point3<f32> {
        Point3::from_vec(self.transform.translation)
    }

    /// Current placement.
    pub fn transform(&self) -> &ObjectTransform {
        &self.transform
    }

    /// Bounds in model space.
    pub fn local_aabb(&self) -> &Aabb {
        &self.local_aabb
    }

    /// World-space bounds, always in sync with the current transform.
    pub fn world_aabb(&self) -> &Aabb {
        &self.world_aabb
    }

    /// Catalog index the object was placed from.
    pub fn block_type(&self) -> usize {
        self.block_type
    }

    /// Moves or rescales the object and refreshes its cached world bounds.
    pub fn set_transform(&mut self, transform: ObjectTransform) {
        self.transform = transform;
        self.refresh_world_aabb();
    }

    fn refresh_world_aabb(&mut self) {
        self.world_aabb = compute_world_aabb(&self.local_aabb, &self.transform.to_matrix());
    }
}
