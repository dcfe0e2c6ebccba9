//! Player kinematic state

use serde::Serialize;
use tread_core::Vec3;

/// Position, velocity and contact flags of the player, mutated once per frame.
///
/// Horizontal velocity is stored as a per-frame displacement (it is
/// accumulated already scaled by delta); vertical velocity is in units per
/// second and scaled when applied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KinematicState {
    /// Center of the player's body
    pub position: Vec3,
    pub velocity: Vec3,
    /// Standing on the floor or a box top
    pub grounded: bool,
    /// A new jump may be started
    pub jump_ready: bool,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

impl KinematicState {
    /// Airborne and at rest at `position`; jumping is armed by the first landing
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: false,
            jump_ready: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn grounded(mut self) -> Self {
        self.grounded = true;
        self.jump_ready = true;
        self
    }

    /// Y of the player's feet
    pub fn feet_y(&self, half_height: f32) -> f32 {
        self.position.y - half_height
    }

    /// Y of the top of the player's head
    pub fn head_y(&self, half_height: f32) -> f32 {
        self.position.y + half_height
    }
}
