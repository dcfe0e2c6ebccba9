//! Explicit simulation context
//!
//! One `Simulation` owns one player's state together with the level it moves
//! through, so any number of independent simulations can coexist.

use crate::camera::GroundBasis;
use crate::config::ControllerConfig;
use crate::integrator::integrate;
use crate::registry::ObstacleRegistry;
use crate::resolver::{resolve, BlockContact, Support};
use crate::state::KinematicState;
use tracing::debug;
use tread_core::Vec3;
use tread_runtime::InputIntent;

/// What happened during one simulation step
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    pub jumped: bool,
    /// Set when the player went from airborne to grounded this step
    pub landed_on: Option<Support>,
    pub blocked: Vec<BlockContact>,
}

/// Player state, level geometry and tunables
#[derive(Clone, Debug)]
pub struct Simulation {
    state: KinematicState,
    registry: ObstacleRegistry,
    config: ControllerConfig,
}

impl Simulation {
    /// Start a player airborne and at rest at `spawn`
    pub fn new(registry: ObstacleRegistry, config: ControllerConfig, spawn: Vec3) -> Self {
        Self {
            state: KinematicState::at(spawn),
            registry,
            config,
        }
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// Replace the player state, e.g. to respawn
    pub fn set_state(&mut self, state: KinematicState) {
        self.state = state;
    }

    pub fn registry(&self) -> &ObstacleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Integrate and resolve one frame
    pub fn step(&mut self, intent: &InputIntent, basis: &GroundBasis, delta: f32) -> StepReport {
        let integration = integrate(self.state, intent, basis, delta, &self.config);
        let outcome = resolve(integration.state, &self.registry, &self.config);
        self.state = outcome.state;

        let landed_on = if outcome.landed { outcome.support } else { None };
        if let Some(support) = landed_on {
            debug!(?support, y = self.state.position.y, "landed");
        }

        StepReport {
            jumped: integration.jumped,
            landed_on,
            blocked: outcome.blocked,
        }
    }

    /// Paused frame: velocity is held at zero and nothing else moves
    pub fn hold_still(&mut self) {
        self.state.velocity = Vec3::ZERO;
    }

    /// Re-arm jumping after a release seen while the simulation is paused
    pub fn note_jump_released(&mut self) {
        self.state.jump_ready = true;
    }
}
