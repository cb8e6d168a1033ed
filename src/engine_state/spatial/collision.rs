//! # Collision Resolution
//!
//! Per-axis movement clamping of the viewer against every placed block.
//!
//! Movement is split into its X, Y and Z components and each is committed
//! only if the viewer's box at the candidate position overlaps nothing. This
//! lets the viewer slide along walls. It is not a swept test: a delta larger
//! than a block can step straight through it, and corner behaviour depends on
//! the fixed X, Y, Z evaluation order.

use cgmath::{Point3, Vector3};

use super::aabb::{overlaps, Aabb};
use crate::engine_state::{viewer_state::viewer::ViewerBody, voxels::world::World};

/// Whether `aabb` overlaps the world bounds of any object in `world`.
pub fn collides(aabb: &Aabb, world: &World) -> bool {
    world
        .iter()
        .any(|object| overlaps(aabb, object.world_aabb()))
}

/// Applies `delta` to `position` one axis at a time, discarding any axis whose
/// movement would make `body` overlap a block.
///
/// # Returns
/// The resolved position.
pub fn resolve_movement(
    position: Point3<f32>,
    delta: Vector3<f32>,
    body: &ViewerBody,
    world: &World,
) -> Point3<f32> {
    let mut resolved = position;

    for axis in 0..3 {
        if delta[axis] == 0.0 {
            continue;
        }

        let mut candidate = resolved;
        candidate[axis] += delta[axis];

        if collides(&body.aabb_at(candidate), world) {
            log::trace!("movement on axis {} blocked at {:?}", axis, candidate);
        } else {
            resolved = candidate;
        }
    }

    resolved
}
