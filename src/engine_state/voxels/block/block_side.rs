//! # Block Side Module
//!
//! This module defines the six faces of a block and the integer face indices
//! reported by ray hits.

use cgmath::Vector3;
use num_derive::FromPrimitive;

/// Represents the six possible faces of a block.
///
/// Each variant carries the face index used throughout the world-interaction
/// code. Faces are paired per axis, negative side first:
///
/// `[LEFT (-X), RIGHT (+X), BOTTOM (-Y), TOP (+Y), BACK (-Z), FRONT (+Z)]`
#[allow(clippy::upper_case_acronyms)]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum BlockSide {
    /// The left face (facing negative X)
    LEFT = 0,

    /// The right face (facing positive X)
    RIGHT = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The back face (facing negative Z)
    BACK = 4,

    /// The front face (facing positive Z)
    FRONT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in face-index order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::BACK,
            BlockSide::FRONT,
        ]
    }

    /// Converts a face index (0..=5) back into a side.
    ///
    /// # Returns
    /// `None` if `index` is out of range.
    pub fn from_index(index: u8) -> Option<Self> {
        num::FromPrimitive::from_u8(index)
    }

    /// The face struck when a ray enters a box through one side of a slab.
    ///
    /// # Arguments
    /// * `axis` - 0 for X, 1 for Y, 2 for Z
    /// * `max_side` - whether the entry plane is the box's maximum on that axis
    pub fn from_axis(axis: usize, max_side: bool) -> Option<Self> {
        let index = axis.checked_mul(2)? + usize::from(max_side);
        Self::from_index(u8::try_from(index).ok()?)
    }

    /// The face index of this side.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The axis this face is perpendicular to (0 = X, 1 = Y, 2 = Z).
    pub fn axis(self) -> usize {
        self as usize / 2
    }

    /// Unit outward normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        match self {
            BlockSide::LEFT => Vector3::new(-1.0, 0.0, 0.0),
            BlockSide::RIGHT => Vector3::new(1.0, 0.0, 0.0),
            BlockSide::BOTTOM => Vector3::new(0.0, -1.0, 0.0),
            BlockSide::TOP => Vector3::new(0.0, 1.0, 0.0),
            BlockSide::BACK => Vector3::new(0.0, 0.0, -1.0),
            BlockSide::FRONT => Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_indices_round_trip_through_from_index() {
        for side in BlockSide::all() {
            assert_eq!(BlockSide::from_index(side.index()), Some(side));
        }
        assert_eq!(BlockSide::from_index(6), None);
    }

    #[test]
    fn slab_entry_maps_to_face_convention() {
        assert_eq!(BlockSide::from_axis(0, false), Some(BlockSide::LEFT));
        assert_eq!(BlockSide::from_axis(0, true), Some(BlockSide::RIGHT));
        assert_eq!(BlockSide::from_axis(1, true), Some(BlockSide::TOP));
        assert_eq!(BlockSide::from_axis(2, false), Some(BlockSide::BACK));
        assert_eq!(BlockSide::from_axis(3, false), None);
    }

    #[test]
    fn normals_point_outward_along_their_axis() {
        for side in BlockSide::all() {
            let normal = side.normal();
            let sign = if side.index() % 2 == 0 { -1.0 } else { 1.0 };
            assert_eq!(normal[side.axis()], sign);
        }
    }
}
