//! # World Module
//!
//! This module provides the `World` store which owns every placed block.
//!
//! ## Architecture
//!
//! Objects live in a plain vector in insertion order. A block's identity is
//! its slot, so removing one shifts every later slot down by one; callers must
//! not hold indices across a removal.
//!
//! Grid occupancy is answered by rounding positions to whole grid cells rather
//! than comparing floats. The store itself never deduplicates; the placement
//! planner checks occupancy before every add.

use cgmath::Point3;

use super::world_object::WorldObject;

/// The ordered collection of placed blocks.
#[derive(Debug, Default, Clone)]
pub struct World {
    objects: Vec<WorldObject>,
}

/// Rounds a world position to the integer grid cell it belongs to.
///
/// # Arguments
/// * `position` - World-space position
/// * `unit` - Spacing between adjacent grid cells
pub fn grid_cell(position: Point3<f32>, unit: f32) -> Point3<i32> {
    Point3::new(
        (position.x / unit).round() as i32,
        (position.y / unit).round() as i32,
        (position.z / unit).round() as i32,
    )
}

/// Snaps a world position to the nearest grid point.
pub fn snap_to_grid(position: Point3<f32>, unit: f32) -> Point3<f32> {
    let cell = grid_cell(position, unit);
    Point3::new(
        cell.x as f32 * unit,
        cell.y as f32 * unit,
        cell.z as f32 * unit,
    )
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World {
            objects: Vec::new(),
        }
    }

    /// Appends an object and returns its slot.
    pub fn add(&mut self, object: WorldObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Removes the object in slot `index`, shifting later objects down.
    ///
    /// # Returns
    /// The removed object, or `None` if the slot does not exist.
    pub fn remove_at(&mut self, index: usize) -> Option<WorldObject> {
        if index < self.objects.len() {
            Some(self.objects.remove(index))
        } else {
            None
        }
    }

    /// The object in slot `index`.
    pub fn get(&self, index: usize) -> Option<&WorldObject> {
        self.objects.get(index)
    }

    /// Iterates objects in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, WorldObject> {
        self.objects.iter()
    }

    /// Number of objects in the store.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether any object sits in the same grid cell as `position`.
    ///
    /// # Arguments
    /// * `position` - World-space position to test
    /// * `unit` - Grid spacing used to round both positions to cells
    pub fn is_occupied(&self, position: Point3<f32>, unit: f32) -> bool {
        let target = grid_cell(position, unit);
        self.objects
            .iter()
            .any(|object| grid_cell(object.grid_position(), unit) == target)
    }
}

impl<'a> IntoIterator for &'a World {
    type Item = &'a WorldObject;
    type IntoIter = std::slice::Iter<'a, WorldObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        spatial::aabb::Aabb,
        voxels::world_object::ObjectTransform,
    };

    const UNIT: f32 = 2.0;

    fn block_at(x: f32, y: f32, z: f32) -> WorldObject {
        WorldObject::new(
            Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
            ObjectTransform::at(Point3::new(x, y, z), 1.0),
            0,
        )
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut world = World::new();
        assert!(world.is_empty());

        assert_eq!(world.add(block_at(0.0, 0.0, 0.0)), 0);
        assert_eq!(world.add(block_at(2.0, 0.0, 0.0)), 1);

        let positions: Vec<_> = world.iter().map(|o| o.grid_position()).collect();
        assert_eq!(positions, vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)]);
    }

    #[test]
    fn remove_at_shifts_later_slots() {
        let mut world = World::new();
        world.add(block_at(0.0, 0.0, 0.0));
        world.add(block_at(2.0, 0.0, 0.0));
        world.add(block_at(4.0, 0.0, 0.0));

        let removed = world.remove_at(1).unwrap();

        assert_eq!(removed.grid_position(), Point3::new(2.0, 0.0, 0.0));
        assert_eq!(world.len(), 2);
        assert_eq!(world.get(1).unwrap().grid_position(), Point3::new(4.0, 0.0, 0.0));
        assert!(world.remove_at(2).is_none());
    }

    #[test]
    fn occupancy_rounds_to_grid_cells() {
        let mut world = World::new();
        world.add(block_at(2.0, 0.0, -2.0));

        assert!(world.is_occupied(Point3::new(2.0, 0.0, -2.0), UNIT));
        assert!(world.is_occupied(Point3::new(2.9, 0.4, -1.2), UNIT));
        assert!(world.is_occupied(Point3::new(1.1, -0.9, -2.9), UNIT));
        assert!(!world.is_occupied(Point3::new(3.1, 0.0, -2.0), UNIT));
        assert!(!world.is_occupied(Point3::new(0.0, 0.0, 0.0), UNIT));
    }

    #[test]
    fn removal_frees_the_cell() {
        let mut world = World::new();
        let slot = world.add(block_at(0.0, 2.0, 0.0));
        world.remove_at(slot);

        assert!(!world.is_occupied(Point3::new(0.0, 2.0, 0.0), UNIT));
    }

    #[test]
    fn snapping_lands_on_grid_points() {
        assert_eq!(snap_to_grid(Point3::new(2.9, -0.9, 5.2), UNIT), Point3::new(2.0, 0.0, 6.0));
        assert_eq!(grid_cell(Point3::new(-3.2, 0.0, 0.4), UNIT), Point3::new(-2, 0, 0));
    }
}
