//! # Spatial Queries
//!
//! Geometry shared by picking, collision and placement.
//!
//! ## Key Components
//! - `aabb`: axis-aligned bounding boxes and their construction from meshes
//! - `raycast`: slab ray tests and nearest-hit search over the world
//! - `collision`: per-axis movement resolution for the viewer
//! - `placement`: turning ray hits into block placement and removal

pub mod aabb;
pub mod collision;
pub mod placement;
pub mod raycast;
