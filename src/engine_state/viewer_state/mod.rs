//! # Viewer State
//!
//! Turns per-frame player actions into viewer movement and look changes.
//!
//! ## Key Components
//! - `Viewer`: position, orientation and collision body
//! - `ViewerController`: accumulates one frame of input and applies it,
//!   routing movement through collision resolution

pub mod viewer;

use cgmath::{Rad, Vector3, Zero};
use web_time::Duration;

use crate::engine_state::{spatial::collision::resolve_movement, voxels::world::World, PlayerAction};
use viewer::Viewer;

/// Handles viewer movement and rotation based on player actions.
///
/// The controller holds the input of a single frame; `update_viewer` consumes
/// it and resets the controller for the next frame.
#[derive(Debug)]
pub struct ViewerController {
    // Movement amounts (1.0 when the key is held)
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,

    // Pointer movement in pixels
    rotate_horizontal: f32,
    rotate_vertical: f32,

    // Configuration
    speed: f32,
    sensitivity: f32,
}

impl ViewerController {
    /// Creates a new controller.
    ///
    /// # Arguments
    /// * `speed` - Movement speed in world units per second
    /// * `sensitivity` - Radians turned per pixel of pointer movement
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            speed,
            sensitivity,
        }
    }

    /// Records the movement flags and look delta of one frame.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.amount_forward = if actions.move_forward { 1.0 } else { 0.0 };
        self.amount_backward = if actions.move_backward { 1.0 } else { 0.0 };
        self.amount_left = if actions.move_left { 1.0 } else { 0.0 };
        self.amount_right = if actions.move_right { 1.0 } else { 0.0 };

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotate_horizontal += delta_x as f32;
            self.rotate_vertical += delta_y as f32;
        }
    }

    /// Checks if there are any pending updates that would affect the viewer.
    pub fn has_updates(&self) -> bool {
        self.amount_forward > 0.0
            || self.amount_backward > 0.0
            || self.amount_left > 0.0
            || self.amount_right > 0.0
            || self.rotate_horizontal != 0.0
            || self.rotate_vertical != 0.0
    }

    /// The unclamped movement for this frame given the viewer's orientation.
    ///
    /// Forward follows the full view direction, so looking up while moving
    /// forward climbs.
    pub fn movement_delta(&self, viewer: &Viewer, dt: Duration) -> Vector3<f32> {
        let distance = self.speed * dt.as_secs_f32();
        let front = viewer.front();
        let right = viewer.right();

        (front * (self.amount_forward - self.amount_backward)
            + right * (self.amount_right - self.amount_left))
            * distance
    }

    /// Applies the recorded look and movement to `viewer`, then resets the controller.
    ///
    /// Look is applied first so movement follows the new orientation. Movement
    /// is resolved per axis against the blocks in `world`.
    pub fn update_viewer(&mut self, viewer: &mut Viewer, world: &World, dt: Duration) {
        viewer.look(
            Rad(self.rotate_horizontal * self.sensitivity),
            Rad(-self.rotate_vertical * self.sensitivity),
        );

        let delta = self.movement_delta(viewer, dt);
        if !delta.is_zero() {
            let resolved = resolve_movement(viewer.position, delta, &viewer.body, world);
            log::trace!("viewer moved {:?} -> {:?}", viewer.position, resolved);
            viewer.position = resolved;
        }

        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
        self.amount_left = 0.0;
        self.amount_right = 0.0;
        self.amount_forward = 0.0;
        self.amount_backward = 0.0;
    }
}
