//! Tread Physics - kinematic first-person controller
//!
//! Advances a player through a static level of axis-aligned boxes:
//! - `ObstacleRegistry` - immutable level geometry plus the floor plane
//! - `KinematicState` - position, velocity, grounded and jump-ready flags
//! - `integrator` - damping, gravity, input acceleration, tentative position
//! - `resolver` - discrete axis-separated collision correction
//! - `Simulation` - explicit context tying state, registry and tunables together
//! - `FrameDriver` - lock state machine and per-refresh sequencing
//! - `LevelFile` - TOML level description

pub mod camera;
pub mod config;
pub mod driver;
pub mod integrator;
pub mod level;
pub mod registry;
pub mod resolver;
pub mod simulation;
pub mod state;

pub use camera::{FirstPersonCamera, GroundBasis};
pub use config::ControllerConfig;
pub use driver::FrameDriver;
pub use level::{Level, LevelFile, ObstacleDef};
pub use registry::ObstacleRegistry;
pub use resolver::{BlockContact, ResolveOutcome, Support};
pub use simulation::{Simulation, StepReport};
pub use state::KinematicState;
