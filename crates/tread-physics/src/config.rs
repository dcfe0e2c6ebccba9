//! Controller tunables and layered configuration
//!
//! Values are resolved with four layers of precedence (highest wins):
//! 1. Environment variables: `TREAD_{FIELD}` (e.g. `TREAD_MOVE_SPEED`)
//! 2. The level file's `[controller]` table
//! 3. Global: `~/.tread/controller.toml`
//! 4. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use tread_core::{Result, TreadError};

/// Tunable constants for the kinematic controller.
///
/// Units are meters and seconds. Defaults reproduce the reference feel and
/// should only be changed deliberately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Full standing height; the position is the body center
    pub player_height: f32,
    /// Horizontal acceleration per held direction (units/second)
    pub move_speed: f32,
    /// Upward velocity added by a jump
    pub jump_impulse: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Horizontal damping coefficient
    pub damping: f32,
    /// Cylinder radius for wall blocking
    pub collision_radius: f32,
    /// Feet within this distance above the floor snap down
    pub floor_tolerance: f32,
    /// Landing band above a box top
    pub top_tolerance_above: f32,
    /// Landing band below a box top
    pub top_tolerance_below: f32,
    /// Upper bound on a physics step (seconds)
    pub max_delta: f32,
    /// Gap left between the player and a blocking face
    pub separation_skin: f32,
    /// Radians of look rotation per pixel of mouse motion
    pub look_sensitivity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            player_height: 1.8,
            move_speed: 8.0,
            jump_impulse: 8.0,
            gravity: 20.0,
            damping: 10.0,
            collision_radius: 0.4,
            floor_tolerance: 0.1,
            top_tolerance_above: 0.1,
            top_tolerance_below: 0.3,
            max_delta: 0.05,
            separation_skin: 0.01,
            look_sensitivity: 0.002,
        }
    }
}

impl ControllerConfig {
    /// Field names as they appear in TOML and (upper-cased) in env vars
    pub const FIELDS: [&'static str; 12] = [
        "player_height",
        "move_speed",
        "jump_impulse",
        "gravity",
        "damping",
        "collision_radius",
        "floor_tolerance",
        "top_tolerance_above",
        "top_tolerance_below",
        "max_delta",
        "separation_skin",
        "look_sensitivity",
    ];

    pub fn half_height(&self) -> f32 {
        self.player_height / 2.0
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut f32> {
        let field = match name {
            "player_height" => &mut self.player_height,
            "move_speed" => &mut self.move_speed,
            "jump_impulse" => &mut self.jump_impulse,
            "gravity" => &mut self.gravity,
            "damping" => &mut self.damping,
            "collision_radius" => &mut self.collision_radius,
            "floor_tolerance" => &mut self.floor_tolerance,
            "top_tolerance_above" => &mut self.top_tolerance_above,
            "top_tolerance_below" => &mut self.top_tolerance_below,
            "max_delta" => &mut self.max_delta,
            "separation_skin" => &mut self.separation_skin,
            "look_sensitivity" => &mut self.look_sensitivity,
            _ => return None,
        };
        Some(field)
    }

    /// Load with layered precedence: defaults < global < `level` table < env vars
    pub fn load_layered(level: &toml::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "applying global controller config");
                config.apply_table(&Self::load_file(&global_path)?)?;
            }
        }

        config.apply_table(level)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrite only the fields present in `table`
    pub fn apply_table(&mut self, table: &toml::Table) -> Result<()> {
        for (key, value) in table {
            let number = match value {
                toml::Value::Float(f) => *f as f32,
                toml::Value::Integer(i) => *i as f32,
                other => {
                    return Err(TreadError::InvalidConfig {
                        field: key.clone(),
                        reason: format!("expected a number, got {}", other.type_str()),
                    })
                }
            };
            let field = self.field_mut(key).ok_or_else(|| TreadError::InvalidConfig {
                field: key.clone(),
                reason: format!(
                    "is not a controller setting (expected one of: {})",
                    Self::FIELDS.join(", ")
                ),
            })?;
            *field = number;
        }
        Ok(())
    }

    /// Apply `TREAD_{FIELD}` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(std::env::vars())
    }

    /// Apply `TREAD_{FIELD}` pairs from any source; unrelated keys are ignored
    pub fn apply_overrides_from<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, raw) in vars {
            let Some(name) = key.strip_prefix("TREAD_") else {
                continue;
            };
            let name = name.to_lowercase();
            let Some(field) = self.field_mut(&name) else {
                continue;
            };
            *field = raw.trim().parse().map_err(|_| TreadError::InvalidConfig {
                field: key.clone(),
                reason: format!("'{}' is not a number", raw),
            })?;
            debug!(field = %name, value = *field, "controller setting overridden from env");
        }
        Ok(())
    }

    /// Reject values the controller cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("player_height", self.player_height),
            ("collision_radius", self.collision_radius),
            ("max_delta", self.max_delta),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "must be a positive number"));
            }
        }

        let non_negative = [
            ("move_speed", self.move_speed),
            ("jump_impulse", self.jump_impulse),
            ("gravity", self.gravity),
            ("damping", self.damping),
            ("floor_tolerance", self.floor_tolerance),
            ("top_tolerance_above", self.top_tolerance_above),
            ("top_tolerance_below", self.top_tolerance_below),
            ("separation_skin", self.separation_skin),
            ("look_sensitivity", self.look_sensitivity),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, "must be zero or greater"));
            }
        }

        // Damping removes this fraction of horizontal velocity per step; at 1
        // or more it overshoots and flips the direction of travel
        if self.damping * self.max_delta >= 1.0 {
            return Err(invalid(
                "damping",
                &format!("times max_delta must stay below 1, got {}", self.damping * self.max_delta),
            ));
        }
        Ok(())
    }

    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".tread").join("controller.toml"))
    }

    fn load_file(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            TreadError::TomlParseError(format!("{}: {}", path.display(), e))
        })
    }
}

fn invalid(field: &str, reason: &str) -> TreadError {
    TreadError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
