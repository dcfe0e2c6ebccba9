//! First-person look orientation

use std::f32::consts::FRAC_PI_2;
use tread_core::Vec3;

/// Pitch limit, just short of straight up/down so the ground projection of
/// the look direction never flips
pub const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// Yaw/pitch camera driven by raw mouse motion
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FirstPersonCamera {
    /// Horizontal look angle in radians; 0 looks down -Z, positive turns left
    pub yaw: f32,
    /// Vertical look angle in radians; positive looks up
    pub pitch: f32,
}

/// Horizontal movement axes derived from the look direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for GroundBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::FORWARD,
            right: Vec3::RIGHT,
        }
    }
}

impl FirstPersonCamera {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
        }
    }

    /// Turn by raw mouse motion. Moving right turns right, moving down looks down.
    pub fn apply_mouse_delta(&mut self, dx: f64, dy: f64, sensitivity: f32) {
        self.yaw -= dx as f32 * sensitivity;
        self.pitch -= dy as f32 * sensitivity;
        self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Unit view direction
    pub fn look_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Look direction flattened onto the ground plane, plus its right-hand
    /// perpendicular (`forward x up`)
    pub fn ground_basis(&self) -> GroundBasis {
        let forward = self.look_direction().with_y(0.0).normalized();
        let right = forward.cross(&Vec3::UP).normalized();
        GroundBasis { forward, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_looks_down_negative_z() {
        let basis = FirstPersonCamera::default().ground_basis();
        assert_relative_eq!(basis.forward.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(basis.forward.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(basis.right.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(basis.right.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_basis_ignores_pitch() {
        let cam = FirstPersonCamera::new(0.7, 1.2);
        let flat = FirstPersonCamera::new(0.7, 0.0);
        let a = cam.ground_basis();
        let b = flat.ground_basis();
        assert_relative_eq!(a.forward.x, b.forward.x, epsilon = 1e-5);
        assert_relative_eq!(a.forward.z, b.forward.z, epsilon = 1e-5);
        assert_eq!(a.forward.y, 0.0);
        assert_relative_eq!(a.forward.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(a.forward.dot(&a.right), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_mouse_right_turns_right() {
        let mut cam = FirstPersonCamera::default();
        cam.apply_mouse_delta(100.0, 0.0, 0.002);
        let forward = cam.ground_basis().forward;
        assert!(forward.x > 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut cam = FirstPersonCamera::default();
        cam.apply_mouse_delta(0.0, -1.0e6, 0.002);
        assert_relative_eq!(cam.pitch, MAX_PITCH);
        assert!(cam.ground_basis().forward.length() > 0.99);

        cam.apply_mouse_delta(0.0, 1.0e6, 0.002);
        assert_relative_eq!(cam.pitch, -MAX_PITCH);
    }

    /// Right is `forward x up`, so the strafe-right key moves toward +X when
    /// looking down -Z. Deriving it as `up x forward` would swap the strafe keys.
    #[test]
    fn test_right_is_forward_cross_up() {
        let basis = FirstPersonCamera::default().ground_basis();
        assert_eq!(basis.right, basis.forward.cross(&Vec3::UP).normalized());

        let swapped = Vec3::UP.cross(&basis.forward);
        assert_relative_eq!(swapped.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(basis.right.x, 1.0, epsilon = 1e-6);

        // Still right-handed after turning: 90 degrees left looks down -X,
        // so right points down -Z
        let turned = FirstPersonCamera::new(std::f32::consts::FRAC_PI_2, 0.0).ground_basis();
        assert_relative_eq!(turned.forward.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(turned.right.z, -1.0, epsilon = 1e-5);
    }
}
