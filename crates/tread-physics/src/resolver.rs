//! Discrete, axis-separated collision resolution
//!
//! Runs after integration each frame in two passes:
//!
//! - **Vertical**: snap onto the floor plane or onto the first box top whose
//!   landing band contains the player's feet. This pass decides `grounded`.
//! - **Horizontal**: push the player (a vertical cylinder) back out of box
//!   faces it crossed this frame, one axis at a time, zeroing the offending
//!   velocity component.
//!
//! Every test is a plain comparison, so degenerate boxes cannot produce NaN.

use crate::config::ControllerConfig;
use crate::registry::ObstacleRegistry;
use crate::state::KinematicState;
use tread_core::{Axis, Vec3};

/// What the player is standing on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Support {
    Floor,
    /// Registry index of the box whose top holds the player
    Obstacle(usize),
}

/// A box face that stopped horizontal movement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockContact {
    /// Registry index of the blocking box
    pub obstacle: usize,
    pub axis: Axis,
}

/// Corrected state plus what happened during resolution
#[derive(Clone, Debug, PartialEq)]
pub struct ResolveOutcome {
    pub state: KinematicState,
    pub support: Option<Support>,
    /// Airborne on entry, grounded on exit
    pub landed: bool,
    pub blocked: Vec<BlockContact>,
}

impl ResolveOutcome {
    pub fn grounded(&self) -> bool {
        self.support.is_some()
    }
}

/// Correct a tentative state against the level geometry
pub fn resolve(
    tentative: KinematicState,
    registry: &ObstacleRegistry,
    config: &ControllerConfig,
) -> ResolveOutcome {
    let was_grounded = tentative.grounded;
    let mut state = tentative;

    let support = resolve_vertical(&mut state, registry, config);
    state.grounded = support.is_some();
    if state.grounded {
        state.jump_ready = true;
    }

    let blocked = resolve_horizontal(&mut state, registry, config);

    ResolveOutcome {
        state,
        support,
        landed: !was_grounded && support.is_some(),
        blocked,
    }
}

/// Floor first, then box tops in registry order; a box top overrides the
/// floor, and the first matching box wins.
pub fn resolve_vertical(
    state: &mut KinematicState,
    registry: &ObstacleRegistry,
    config: &ControllerConfig,
) -> Option<Support> {
    let half = config.half_height();
    let mut support = None;

    let floor_y = registry.floor_y();
    if state.feet_y(half) < floor_y + config.floor_tolerance && state.velocity.y <= 0.0 {
        state.position.y = floor_y + half;
        state.velocity.y = 0.0;
        support = Some(Support::Floor);
    }

    for (index, aabb) in registry.iter().enumerate() {
        let (min, max) = (aabb.min(), aabb.max());
        let p = state.position;
        let feet = state.feet_y(half);

        let within_footprint = p.x > min.x && p.x < max.x && p.z > min.z && p.z < max.z;
        let within_band =
            feet < max.y + config.top_tolerance_above && feet > max.y - config.top_tolerance_below;

        if within_footprint && within_band && state.velocity.y <= 0.0 {
            state.position.y = max.y + half;
            state.velocity.y = 0.0;
            support = Some(Support::Obstacle(index));
            break;
        }
    }

    support
}

/// Block horizontal movement against box faces.
///
/// The position at pass start is snapshotted once and threaded through both
/// axis tests: the X test reads the snapshot's Z band, the Z test reads the
/// snapshot's X band, so an X correction never feeds the Z test of the same
/// frame.
pub fn resolve_horizontal(
    state: &mut KinematicState,
    registry: &ObstacleRegistry,
    config: &ControllerConfig,
) -> Vec<BlockContact> {
    let half = config.half_height();
    let r = config.collision_radius;
    let skin = config.separation_skin;
    let snapshot = state.position;
    let mut blocked = Vec::new();

    for (index, aabb) in registry.iter().enumerate() {
        if !aabb.overlaps_vertical(state.feet_y(half), state.head_y(half)) {
            continue;
        }
        let (min, max) = (aabb.min(), aabb.max());

        if block_x(state, snapshot, min, max, r, skin) {
            blocked.push(BlockContact {
                obstacle: index,
                axis: Axis::X,
            });
        }
        if block_z(state, snapshot, min, max, r, skin) {
            blocked.push(BlockContact {
                obstacle: index,
                axis: Axis::Z,
            });
        }
    }

    blocked
}

fn block_x(state: &mut KinematicState, snapshot: Vec3, min: Vec3, max: Vec3, r: f32, skin: f32) -> bool {
    let x = state.position.x;
    let overlaps = x + r > min.x
        && x - r < max.x
        && snapshot.z + r > min.z
        && snapshot.z - r < max.z;
    if !overlaps {
        return false;
    }

    let vx = state.velocity.x;
    if vx > 0.0 && x + r > min.x && snapshot.x - r < min.x {
        state.position.x = min.x - r - skin;
    } else if vx < 0.0 && x - r < max.x && snapshot.x + r > max.x {
        state.position.x = max.x + r + skin;
    } else {
        return false;
    }
    state.velocity.x = 0.0;
    true
}

fn block_z(state: &mut KinematicState, snapshot: Vec3, min: Vec3, max: Vec3, r: f32, skin: f32) -> bool {
    let z = state.position.z;
    let overlaps = z + r > min.z
        && z - r < max.z
        && snapshot.x + r > min.x
        && snapshot.x - r < max.x;
    if !overlaps {
        return false;
    }

    let vz = state.velocity.z;
    if vz > 0.0 && z + r > min.z && snapshot.z - r < min.z {
        state.position.z = min.z - r - skin;
    } else if vz < 0.0 && z - r < max.z && snapshot.z + r > max.z {
        state.position.z = max.z + r + skin;
    } else {
        return false;
    }
    state.velocity.z = 0.0;
    true
}
