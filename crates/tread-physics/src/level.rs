//! Level files
//!
//! A level is a TOML document with a `[level]` header, optional
//! `[controller]` overrides, optional `[bindings]`, and an ordered list of
//! `[[obstacles]]`. Obstacle order in the file is registry order.

use crate::config::ControllerConfig;
use crate::registry::ObstacleRegistry;
use crate::simulation::Simulation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;
use tread_core::{Aabb, Result, TreadError, Vec3};
use tread_runtime::{key_code_from_name, InputState};

/// Root structure of a level TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub level: LevelInfo,
    /// Raw controller overrides, layered over the global config at build time
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub controller: toml::Table,
    /// Action name to key names, e.g. `jump = ["Space"]`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
}

/// Level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub name: String,
    #[serde(default)]
    pub floor_y: f32,
    #[serde(default = "default_spawn")]
    pub spawn: [f32; 3],
}

fn default_spawn() -> [f32; 3] {
    [0.0, 1.8, 0.0]
}

/// One box, given either as `min`/`max` corners or as `center`/`size`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 3]>,
}

impl ObstacleDef {
    pub fn corners(name: impl Into<String>, min: [f32; 3], max: [f32; 3]) -> Self {
        Self {
            name: Some(name.into()),
            min: Some(min),
            max: Some(max),
            ..Default::default()
        }
    }

    pub fn centered(name: impl Into<String>, center: [f32; 3], size: [f32; 3]) -> Self {
        Self {
            name: Some(name.into()),
            center: Some(center),
            size: Some(size),
            ..Default::default()
        }
    }

    fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("obstacle {} ('{}')", index, name),
            None => format!("obstacle {}", index),
        }
    }

    /// Build the box, rejecting mixed or incomplete forms
    pub fn to_aabb(&self, index: usize) -> Result<Aabb> {
        let aabb = match (self.min, self.max, self.center, self.size) {
            (Some(min), Some(max), None, None) => {
                Aabb::new(Vec3::from_array(min), Vec3::from_array(max))
            }
            (None, None, Some(center), Some(size)) => {
                Aabb::from_center_size(Vec3::from_array(center), Vec3::from_array(size))
            }
            _ => {
                return Err(TreadError::LevelError(format!(
                    "{} needs either min and max or center and size",
                    self.label(index)
                )))
            }
        };
        aabb.map_err(|e| TreadError::LevelError(format!("{}: {}", self.label(index), e)))
    }
}

/// A level ready to simulate
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub registry: ObstacleRegistry,
    pub config: ControllerConfig,
    pub spawn: Vec3,
    pub bindings: BTreeMap<String, Vec<String>>,
}

impl Level {
    pub fn into_simulation(self) -> Simulation {
        Simulation::new(self.registry, self.config, self.spawn)
    }

    /// Apply the level's key bindings on top of the defaults in `input`
    pub fn apply_bindings(&self, input: &mut InputState) -> Result<()> {
        for (action, keys) in &self.bindings {
            input.bind_action_names(action, keys)?;
        }
        Ok(())
    }
}

impl LevelFile {
    /// Load a level from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            TreadError::TomlParseError(msg) => {
                TreadError::TomlParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// The reference room: 20 x 20 floor, four walls 5 high and 1 thick on the
    /// room edges, and one 3 m cube resting on the floor at (5, 5).
    pub fn default_room() -> Self {
        let room = 20.0;
        let half = room / 2.0;
        let wall_height = 5.0;
        let thickness = 1.0;
        let wall_y = wall_height / 2.0;

        Self {
            level: LevelInfo {
                name: "room".to_string(),
                floor_y: 0.0,
                spawn: default_spawn(),
            },
            controller: toml::Table::new(),
            bindings: BTreeMap::new(),
            obstacles: vec![
                ObstacleDef::centered(
                    "north_wall",
                    [0.0, wall_y, -half],
                    [room, wall_height, thickness],
                ),
                ObstacleDef::centered(
                    "south_wall",
                    [0.0, wall_y, half],
                    [room, wall_height, thickness],
                ),
                ObstacleDef::centered(
                    "west_wall",
                    [-half, wall_y, 0.0],
                    [thickness, wall_height, room],
                ),
                ObstacleDef::centered(
                    "east_wall",
                    [half, wall_y, 0.0],
                    [thickness, wall_height, room],
                ),
                ObstacleDef::centered("crate", [5.0, 1.5, 5.0], [3.0, 3.0, 3.0]),
            ],
        }
    }

    /// Obstacle boxes plus the floor, in file order
    pub fn registry(&self) -> Result<ObstacleRegistry> {
        if !self.level.floor_y.is_finite() {
            return Err(TreadError::LevelError("floor_y must be finite".into()));
        }
        let boxes = self
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, def)| def.to_aabb(i))
            .collect::<Result<Vec<_>>>()?;
        Ok(ObstacleRegistry::new(self.level.floor_y, boxes))
    }

    /// Resolve the controller config through every layer and build the level
    pub fn build(&self) -> Result<Level> {
        let config = ControllerConfig::load_layered(&self.controller)?;
        self.build_with_config(config)
    }

    /// Build with an already resolved config, skipping global and env layers
    pub fn build_with_config(&self, config: ControllerConfig) -> Result<Level> {
        config.validate()?;
        let registry = self.registry()?;

        let spawn = Vec3::from_array(self.level.spawn);
        if !spawn.is_finite() {
            return Err(TreadError::LevelError("spawn must be finite".into()));
        }

        for name in self.bindings.values().flatten() {
            key_code_from_name(name)?;
        }

        info!(
            level = %self.level.name,
            obstacles = registry.len(),
            floor_y = registry.floor_y(),
            "level built"
        );
        Ok(Level {
            name: self.level.name.clone(),
            registry,
            config,
            spawn,
            bindings: self.bindings.clone(),
        })
    }
}
