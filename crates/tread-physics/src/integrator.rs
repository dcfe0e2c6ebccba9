//! Velocity and position integration
//!
//! Horizontal and vertical motion use different time-scaling conventions:
//! horizontal velocity accumulates already scaled by delta and is added to the
//! position as-is, while vertical velocity is in units per second and scaled
//! when applied. Both must stay this way; the jump arc depends on it.

use crate::camera::GroundBasis;
use crate::config::ControllerConfig;
use crate::state::KinematicState;
use tracing::debug;
use tread_runtime::InputIntent;

/// Result of integrating one frame, before collision correction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integration {
    /// Tentative state
    pub state: KinematicState,
    /// A jump impulse was applied this frame
    pub jumped: bool,
}

/// Handle the jump edges. Returns true when an impulse was applied.
///
/// A jump needs both ground contact and `jump_ready`; releasing the jump key
/// re-arms `jump_ready`.
pub fn apply_jump(
    state: &mut KinematicState,
    intent: &InputIntent,
    config: &ControllerConfig,
) -> bool {
    let mut jumped = false;
    if intent.jump_requested && state.jump_ready && state.grounded {
        state.velocity.y += config.jump_impulse;
        state.grounded = false;
        state.jump_ready = false;
        jumped = true;
        debug!(y = state.position.y, "jump");
    }
    if intent.jump_released {
        state.jump_ready = true;
    }
    jumped
}

/// Advance `state` by `delta` seconds of damping, gravity and input
/// acceleration, producing the tentative state for the resolver.
///
/// `delta` is clamped to `[0, config.max_delta]`; NaN counts as zero.
pub fn integrate(
    state: KinematicState,
    intent: &InputIntent,
    basis: &GroundBasis,
    delta: f32,
    config: &ControllerConfig,
) -> Integration {
    let delta = delta.max(0.0).min(config.max_delta);
    let mut s = state;

    let jumped = apply_jump(&mut s, intent, config);

    s.velocity.x -= s.velocity.x * config.damping * delta;
    s.velocity.z -= s.velocity.z * config.damping * delta;

    if !s.grounded {
        s.velocity.y -= config.gravity * delta;
    }

    // Flags add independently, so diagonals are faster than single axes
    let step = config.move_speed * delta;
    if intent.forward {
        s.velocity += basis.forward * step;
    }
    if intent.backward {
        s.velocity -= basis.forward * step;
    }
    if intent.left {
        s.velocity -= basis.right * step;
    }
    if intent.right {
        s.velocity += basis.right * step;
    }

    s.position.x += s.velocity.x;
    s.position.z += s.velocity.z;
    s.position.y += s.velocity.y * delta;

    Integration { state: s, jumped }
}
