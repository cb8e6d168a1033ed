//! # Axis-Aligned Bounding Boxes
//!
//! Bounding volumes for world objects and the viewer. A local-space box is
//! derived once from a mesh's interleaved vertex buffer and then mapped into
//! world space under an object's transform.

use cgmath::{Matrix4, Point3, Transform, Vector3};

use crate::error::BoundsError;

/// Number of floats that make up a vertex position at the start of each stride.
const POSITION_COMPONENTS: usize = 3;

/// An axis-aligned box defined by its minimum and maximum corners.
///
/// Both corners are always in the same coordinate space and `min[i] <= max[i]`
/// holds on every axis for boxes produced by this module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Corner with the smallest coordinate on every axis
    pub min: Point3<f32>,
    /// Corner with the largest coordinate on every axis
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from explicit corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Creates a box centered on `center` reaching `half_extents` along each axis.
    pub fn from_center_half_extents(center: Point3<f32>, half_extents: Vector3<f32>) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Whether `point` lies inside or on the boundary of the box.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// The eight corners of the box.
    ///
    /// The bits of the corner index select max (1) or min (0) for x, y and z.
    pub fn corners(&self) -> [Point3<f32>; 8] {
        std::array::from_fn(|i| {
            Point3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// The smallest box containing every point yielded by `points`.
    ///
    /// Returns `None` when `points` is empty.
    pub fn enclosing<I: IntoIterator<Item = Point3<f32>>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Aabb::new(first, first);

        for point in points {
            for axis in 0..3 {
                aabb.min[axis] = aabb.min[axis].min(point[axis]);
                aabb.max[axis] = aabb.max[axis].max(point[axis]);
            }
        }

        Some(aabb)
    }
}

/// Computes the local-space bounds of an interleaved vertex buffer.
///
/// Each vertex occupies `stride` floats and starts with its x, y, z position;
/// the remaining attributes are ignored.
///
/// # Errors
/// * `BoundsError::InvalidStride` if `stride` cannot hold a position
/// * `BoundsError::EmptyVertexBuffer` if there are no vertices
/// * `BoundsError::MalformedVertexBuffer` if the buffer ends mid-vertex
pub fn compute_local_aabb(vertices: &[f32], stride: usize) -> Result<Aabb, BoundsError> {
    if stride < POSITION_COMPONENTS {
        return Err(BoundsError::InvalidStride { stride });
    }
    if vertices.is_empty() {
        return Err(BoundsError::EmptyVertexBuffer);
    }
    if vertices.len() % stride != 0 {
        return Err(BoundsError::MalformedVertexBuffer {
            len: vertices.len(),
            stride,
        });
    }

    let positions = vertices
        .chunks_exact(stride)
        .map(|vertex| Point3::new(vertex[0], vertex[1], vertex[2]));

    Aabb::enclosing(positions).ok_or(BoundsError::EmptyVertexBuffer)
}

/// Maps a local-space box into world space.
///
/// All eight corners are transformed and re-enclosed. For translation plus
/// uniform scale the result bounds the object exactly; a rotated transform
/// still yields a valid but looser enclosing box.
pub fn compute_world_aabb(local: &Aabb, transform: &Matrix4<f32>) -> Aabb {
    let corners = local.corners().map(|corner| transform.transform_point(corner));
    let first = corners[0];

    Aabb::enclosing(corners).unwrap_or(Aabb::new(first, first))
}

/// Separating-axis overlap test. Touching faces count as overlapping.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    (0..3).all(|axis| a.min[axis] <= b.max[axis] && a.max[axis] >= b.min[axis])
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Matrix4, Vector3};

    const STRIDE: usize = 8;

    fn vertex(x: f32, y: f32, z: f32) -> [f32; STRIDE] {
        [x, y, z, 0.5, 0.5, 0.0, 1.0, 0.0]
    }

    fn approx_eq(a: Point3<f32>, b: Point3<f32>) -> bool {
        (0..3).all(|axis| (a[axis] - b[axis]).abs() < 1e-5)
    }

    #[test]
    fn local_bounds_contain_every_vertex() {
        let vertices: Vec<f32> = [
            vertex(-1.0, 0.5, 2.0),
            vertex(3.0, -2.0, 0.0),
            vertex(0.25, 4.0, -1.5),
        ]
        .concat();

        let aabb = compute_local_aabb(&vertices, STRIDE).unwrap();

        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, -1.5));
        assert_eq!(aabb.max, Point3::new(3.0, 4.0, 2.0));
        for v in vertices.chunks_exact(STRIDE) {
            assert!(aabb.contains_point(Point3::new(v[0], v[1], v[2])));
        }
    }

    #[test]
    fn auxiliary_attributes_are_ignored() {
        let mut single = vertex(1.0, 1.0, 1.0);
        single[3..].copy_from_slice(&[100.0, -100.0, 50.0, -50.0, 25.0]);

        let aabb = compute_local_aabb(&single, STRIDE).unwrap();

        assert_eq!(aabb.min, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn empty_and_malformed_buffers_are_rejected() {
        assert_eq!(
            compute_local_aabb(&[], STRIDE),
            Err(BoundsError::EmptyVertexBuffer)
        );
        assert_eq!(
            compute_local_aabb(&[0.0; 10], STRIDE),
            Err(BoundsError::MalformedVertexBuffer { len: 10, stride: 8 })
        );
        assert_eq!(
            compute_local_aabb(&[0.0; 4], 2),
            Err(BoundsError::InvalidStride { stride: 2 })
        );
    }

    #[test]
    fn world_bounds_follow_translation_and_scale() {
        let local = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let transform =
            Matrix4::from_translation(Vector3::new(4.0, 0.0, -2.0)) * Matrix4::from_scale(0.5);

        let world = compute_world_aabb(&local, &transform);

        assert!(approx_eq(world.min, Point3::new(3.5, -0.5, -2.5)));
        assert!(approx_eq(world.max, Point3::new(4.5, 0.5, -1.5)));
    }

    #[test]
    fn rotated_bounds_are_conservative() {
        let local = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let world = compute_world_aabb(&local, &Matrix4::from_angle_y(Deg(45.0)));

        let reach = std::f32::consts::SQRT_2;
        assert!(approx_eq(world.min, Point3::new(-reach, -1.0, -reach)));
        assert!(approx_eq(world.max, Point3::new(reach, 1.0, reach)));
        for corner in local.corners() {
            assert!(world.contains_point(corner));
        }
    }

    #[test]
    fn overlap_requires_every_axis() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        let touching = Aabb::new(Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 1.0, 1.0));
        let separated_on_z = Aabb::new(Point3::new(1.0, 1.0, 2.5), Point3::new(3.0, 3.0, 4.0));

        assert!(overlaps(&a, &a));
        assert!(overlaps(&a, &touching));
        assert!(!overlaps(&a, &separated_on_z));
        assert!(!overlaps(&separated_on_z, &a));
    }
}
