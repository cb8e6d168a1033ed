//! # Viewer
//!
//! The first-person viewer: position, yaw/pitch orientation, and the box used
//! for collision against placed blocks.

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

use crate::engine_state::spatial::{aabb::Aabb, raycast::Ray};

/// Pitch limit just inside straight up/down so the right vector stays defined
pub const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// The viewer's collision volume relative to its position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerBody {
    /// Half extent along X and Z
    pub half_width: f32,
    /// Half extent along Y
    pub half_height: f32,
    /// Offset from the viewer's position to the center of the box
    pub offset: Vector3<f32>,
}

impl ViewerBody {
    /// Creates a body from its half extents and eye offset.
    pub fn new(half_width: f32, half_height: f32, offset: Vector3<f32>) -> Self {
        Self {
            half_width,
            half_height,
            offset,
        }
    }

    /// The collision box for a viewer standing at `position`.
    pub fn aabb_at(&self, position: Point3<f32>) -> Aabb {
        Aabb::from_center_half_extents(
            position + self.offset,
            Vector3::new(self.half_width, self.half_height, self.half_width),
        )
    }
}

/// Represents the first-person viewer in 3D space.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Viewer {
    /// The eye position in world space, also the pick-ray origin
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians, kept within `±SAFE_FRAC_PI_2`
    pub pitch: Rad<f32>,
    /// Collision volume used for movement and placement checks
    pub body: ViewerBody,
}

impl Viewer {
    /// Creates a new viewer with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial eye position. Can be any type that converts to `Point3<f32>`.
    /// * `yaw` - Initial yaw. Can be any type that converts to `Rad<f32>`.
    /// * `pitch` - Initial pitch, clamped to `±SAFE_FRAC_PI_2`.
    /// * `body` - Collision volume
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
        body: ViewerBody,
    ) -> Self {
        let mut viewer = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
            body,
        };
        viewer.clamp_pitch();
        viewer
    }

    /// Unit vector the viewer is looking along.
    pub fn front(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Unit vector pointing to the viewer's right.
    pub fn right(&self) -> Vector3<f32> {
        self.front().cross(Vector3::unit_y()).normalize()
    }

    /// Turns the viewer by the given yaw and pitch increments.
    pub fn look(&mut self, yaw_delta: Rad<f32>, pitch_delta: Rad<f32>) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        self.clamp_pitch();
    }

    /// The viewer's collision box at its current position.
    pub fn aabb(&self) -> Aabb {
        self.body.aabb_at(self.position)
    }

    /// A ray from the eye along the view direction.
    pub fn pick_ray(&self, max_distance: f32) -> Option<Ray> {
        Ray::new(self.position, self.front(), max_distance)
    }

    fn clamp_pitch(&mut self) {
        if self.pitch < -Rad(SAFE_FRAC_PI_2) {
            self.pitch = -Rad(SAFE_FRAC_PI_2);
        } else if self.pitch > Rad(SAFE_FRAC_PI_2) {
            self.pitch = Rad(SAFE_FRAC_PI_2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(yaw: f32, pitch: f32) -> Viewer {
        Viewer::new(
            Point3::new(0.0, 0.0, 0.0),
            Deg(yaw),
            Deg(pitch),
            ViewerBody::new(0.3, 0.9, Vector3::new(0.0, -0.7, 0.0)),
        )
    }

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn default_yaw_looks_down_negative_z() {
        let viewer = viewer(-90.0, 0.0);

        assert!(close(viewer.front(), Vector3::new(0.0, 0.0, -1.0)));
        assert!(close(viewer.right(), Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn pitch_is_clamped_short_of_vertical() {
        let mut viewer = viewer(0.0, 0.0);
        viewer.look(Rad(0.0), Rad(10.0));
        assert_eq!(viewer.pitch, Rad(SAFE_FRAC_PI_2));

        viewer.look(Rad(0.0), Rad(-20.0));
        assert_eq!(viewer.pitch, -Rad(SAFE_FRAC_PI_2));

        let right = viewer.right();
        assert!(right.x.is_finite() && right.y.is_finite() && right.z.is_finite());
    }

    #[test]
    fn body_box_is_centered_on_offset_position() {
        let aabb = viewer(0.0, 0.0).aabb();

        assert!((aabb.min.x + 0.3).abs() < 1e-6);
        assert!((aabb.min.y + 1.6).abs() < 1e-6);
        assert!((aabb.max.y - 0.2).abs() < 1e-6);
        assert!((aabb.max.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn pick_ray_starts_at_eye() {
        let ray = viewer(0.0, 0.0).pick_ray(20.0).unwrap();

        assert_eq!(ray.origin, Point3::new(0.0, 0.0, 0.0));
        assert!(close(ray.direction, Vector3::new(1.0, 0.0, 0.0)));
        assert_eq!(ray.max_distance, 20.0);
    }
}
