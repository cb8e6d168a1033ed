//! # Block Placement
//!
//! Turns ray hits into world edits. Removal deletes the nearest struck block.
//! Placement puts a new block one grid unit out from the struck face, after
//! checking that the cell is free and that the new block would not overlap
//! the viewer. Every check runs before the world is touched, so a rejected or
//! failed placement leaves it unchanged.

use cgmath::{Point3, Vector3};

use super::{
    aabb::{overlaps, Aabb},
    raycast::{nearest_hit, HitResult, Ray},
};
use crate::engine_state::voxels::{
    world::{grid_cell, snap_to_grid, World},
    world_object::{ObjectTransform, WorldObject},
};
use crate::error::AssetError;

/// Why a placement did not happen. None of these are faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRejection {
    /// A block already sits in the target grid cell
    Occupied {
        /// Grid cell of the existing block
        cell: Point3<i32>,
    },
    /// The new block would overlap the viewer
    ViewerOverlap,
    /// The struck object is no longer in the world
    TargetMissing,
}

/// Result of a placement attempt that did not fail on assets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementOutcome {
    /// A block was added to the world
    Placed {
        /// Store index of the new block
        index: usize,
        /// Grid-snapped world position
        position: Point3<f32>,
    },
    /// Nothing was added
    Rejected(PlacementRejection),
}

/// Grid parameters used to place and remove blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPlanner {
    /// Spacing between adjacent block positions
    pub unit: f32,
    /// Uniform scale given to newly placed blocks
    pub block_scale: f32,
}

impl PlacementPlanner {
    /// Creates a planner for a grid of `unit` spacing.
    pub fn new(unit: f32, block_scale: f32) -> Self {
        Self { unit, block_scale }
    }

    /// Removes the block nearest along `ray`, if any.
    pub fn remove_targeted(&self, world: &mut World, ray: &Ray) -> Option<WorldObject> {
        let hit = nearest_hit(ray, world)?;
        let removed = world.remove_at(hit.object_index)?;
        log::info!(
            "Removed block at {:?} (slot {})",
            removed.grid_position(),
            hit.object_index
        );
        Some(removed)
    }

    /// The box a block would occupy at grid position `position`.
    pub fn block_aabb(&self, position: Point3<f32>) -> Aabb {
        let half = self.unit * 0.5;
        Aabb::from_center_half_extents(position, Vector3::new(half, half, half))
    }

    /// Computes and validates the position for a block placed against `hit`.
    ///
    /// # Returns
    /// The grid position of the new block, or the reason it cannot go there.
    pub fn plan(
        &self,
        world: &World,
        hit: &HitResult,
        viewer_aabb: &Aabb,
    ) -> Result<Point3<f32>, PlacementRejection> {
        let target = world
            .get(hit.object_index)
            .ok_or(PlacementRejection::TargetMissing)?;

        let snapped = snap_to_grid(target.grid_position(), self.unit);
        let candidate = snapped + hit.side.normal() * self.unit;

        if world.is_occupied(candidate, self.unit) {
            return Err(PlacementRejection::Occupied {
                cell: grid_cell(candidate, self.unit),
            });
        }
        if overlaps(&self.block_aabb(candidate), viewer_aabb) {
            return Err(PlacementRejection::ViewerOverlap);
        }

        Ok(candidate)
    }

    /// Places a block of `block_type` against `hit`.
    ///
    /// `load_bounds` supplies the local bounds of the block type's mesh and is
    /// only called once the position has been validated.
    ///
    /// # Errors
    /// Any `AssetError` from `load_bounds`; the world is left unchanged.
    pub fn place<F>(
        &self,
        world: &mut World,
        hit: &HitResult,
        viewer_aabb: &Aabb,
        block_type: usize,
        load_bounds: F,
    ) -> Result<PlacementOutcome, AssetError>
    where
        F: FnOnce(usize) -> Result<Aabb, AssetError>,
    {
        let position = match self.plan(world, hit, viewer_aabb) {
            Ok(position) => position,
            Err(rejection) => {
                log::debug!("Placement rejected: {:?}", rejection);
                return Ok(PlacementOutcome::Rejected(rejection));
            }
        };

        let local_aabb = load_bounds(block_type)?;
        let index = world.add(WorldObject::new(
            local_aabb,
            ObjectTransform::at(position, self.block_scale),
            block_type,
        ));
        log::info!("Placed block type {} at {:?}", block_type, position);

        Ok(PlacementOutcome::Placed { index, position })
    }
}
