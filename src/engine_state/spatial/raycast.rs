//! # Raycasting
//!
//! Slab-method ray/box intersection with face identification, and the
//! nearest-hit query across every object in the world.

use cgmath::{InnerSpace, Point3, Vector3};

use super::aabb::Aabb;
use crate::engine_state::voxels::{block::block_side::BlockSide, world::World};

/// Direction components smaller than this are treated as parallel to the slab.
pub const PARALLEL_EPSILON: f32 = 1e-8;

/// A pick ray with a bounded reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Where the ray starts, usually the viewer's eye
    pub origin: Point3<f32>,
    /// Unit direction of travel
    pub direction: Vector3<f32>,
    /// Hits further than this along the ray are ignored
    pub max_distance: f32,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// # Returns
    /// `None` if `direction` has zero length.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>, max_distance: f32) -> Option<Self> {
        if direction.magnitude2() <= 0.0 || !direction.magnitude2().is_finite() {
            return None;
        }

        Some(Self {
            origin,
            direction: direction.normalize(),
            max_distance,
        })
    }

    /// The point reached after travelling `t` along the ray.
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// Where and through which face a ray enters a single box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbHit {
    /// Entry distance along the ray
    pub t: f32,
    /// World-space entry point
    pub point: Point3<f32>,
    /// Face the ray entered through
    pub side: BlockSide,
}

/// The nearest object struck by a ray.
///
/// `object_index` is a slot in the [`World`] store and is only valid until the
/// next removal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Store index of the struck object
    pub object_index: usize,
    /// Entry point in world space
    pub point: Point3<f32>,
    /// Face the ray entered through
    pub side: BlockSide,
    /// Distance along the ray to `point`
    pub t: f32,
}

/// Intersects `ray` with `aabb` using the slab method.
///
/// Returns `None` when the ray misses, when the box lies behind the origin,
/// when the origin is already inside the box, or when the entry point is
/// beyond `ray.max_distance`.
pub fn intersect(ray: &Ray, aabb: &Aabb) -> Option<AabbHit> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut entry_side = None;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];

        if direction.abs() < PARALLEL_EPSILON {
            if origin < aabb.min[axis] || origin > aabb.max[axis] {
                return None;
            }
            continue;
        }

        let mut t1 = (aabb.min[axis] - origin) / direction;
        let mut t2 = (aabb.max[axis] - origin) / direction;
        let mut enters_max_side = false;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
            enters_max_side = true;
        }

        if t1 > t_near {
            t_near = t1;
            entry_side = BlockSide::from_axis(axis, enters_max_side);
        }
        t_far = t_far.min(t2);
    }

    // Origin inside the box is rejected rather than clamped to the origin.
    if t_near > t_far || t_far < 0.0 || t_near < 0.0 || t_near > ray.max_distance {
        return None;
    }

    Some(AabbHit {
        t: t_near,
        point: ray.point_at(t_near),
        side: entry_side?,
    })
}

/// Finds the object whose world bounds `ray` enters first.
///
/// Ties keep the object that comes first in store order.
pub fn nearest_hit(ray: &Ray, world: &World) -> Option<HitResult> {
    let mut nearest: Option<HitResult> = None;

    for (object_index, object) in world.iter().enumerate() {
        let Some(hit) = intersect(ray, object.world_aabb()) else {
            continue;
        };

        if nearest.map_or(true, |best| hit.t < best.t) {
            nearest = Some(HitResult {
                object_index,
                point: hit.point,
                side: hit.side,
                t: hit.t,
            });
        }
    }

    nearest
}
