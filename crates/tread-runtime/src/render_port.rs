//! Render handoff boundary
//!
//! The controller never draws. After each frame it hands the camera pose to
//! whatever implements [`RenderPort`].

use serde::Serialize;
use tread_core::Vec3;

/// Camera pose and player status produced by one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Frame number since the driver started
    pub frame: u64,
    /// Clamped delta used for this frame, in seconds
    pub delta: f32,
    /// Camera (player) position
    pub eye_position: Vec3,
    /// Unit view direction
    pub look_direction: Vec3,
    /// Yaw in radians, 0 looks down -Z
    pub yaw: f32,
    /// Pitch in radians, positive looks up
    pub pitch: f32,
    pub velocity: Vec3,
    pub grounded: bool,
    pub locked: bool,
}

/// Receives the pose after every frame; typically forwards it to a renderer
pub trait RenderPort {
    fn present(&mut self, frame: &RenderFrame);
}
