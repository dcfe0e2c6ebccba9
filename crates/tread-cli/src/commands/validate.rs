//! Level validation command

use super::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use tread_physics::{ControllerConfig, Level, LevelFile};

pub struct ValidateArgs {
    pub level: String,
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct ObstacleSummary {
    index: usize,
    name: Option<String>,
    min: [f32; 3],
    max: [f32; 3],
}

#[derive(Debug, Serialize)]
struct LevelSummary {
    name: String,
    floor_y: f32,
    spawn: [f32; 3],
    obstacles: Vec<ObstacleSummary>,
    config: ControllerConfig,
    warnings: Vec<String>,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let file = LevelFile::load(&args.level)
        .with_context(|| format!("loading level '{}'", args.level))?;
    let level = file
        .build()
        .with_context(|| format!("level '{}' is invalid", args.level))?;

    let summary = summarize(&file, &level);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => {
            println!("Level '{}' is valid", summary.name);
            println!("  floor y: {}", summary.floor_y);
            println!(
                "  spawn: ({}, {}, {})",
                summary.spawn[0], summary.spawn[1], summary.spawn[2]
            );
            println!("  obstacles: {}", summary.obstacles.len());
            for o in &summary.obstacles {
                println!(
                    "    [{}] {:<12} min {:?} max {:?}",
                    o.index,
                    o.name.as_deref().unwrap_or("-"),
                    o.min,
                    o.max
                );
            }
            for warning in &summary.warnings {
                println!("  warning: {}", warning);
            }
        }
    }
    Ok(())
}

fn summarize(file: &LevelFile, level: &Level) -> LevelSummary {
    let obstacles = level
        .registry
        .iter()
        .enumerate()
        .map(|(index, aabb)| ObstacleSummary {
            index,
            name: file.obstacles.get(index).and_then(|d| d.name.clone()),
            min: aabb.min().to_array(),
            max: aabb.max().to_array(),
        })
        .collect();

    LevelSummary {
        name: level.name.clone(),
        floor_y: level.registry.floor_y(),
        spawn: level.spawn.to_array(),
        obstacles,
        config: level.config.clone(),
        warnings: warnings(level),
    }
}

/// Things that load fine but will probably not play the way the author meant
fn warnings(level: &Level) -> Vec<String> {
    let mut out = Vec::new();
    let r = level.config.collision_radius;
    let half = level.config.half_height();
    let spawn = level.spawn;

    for (i, aabb) in level.registry.iter().enumerate() {
        if aabb.is_degenerate() {
            out.push(format!("obstacle {} has zero volume", i));
        }
        let (min, max) = (aabb.min(), aabb.max());
        let inside_xz = spawn.x + r > min.x
            && spawn.x - r < max.x
            && spawn.z + r > min.z
            && spawn.z - r < max.z;
        if inside_xz && aabb.overlaps_vertical(spawn.y - half, spawn.y + half) {
            out.push(format!("spawn point overlaps obstacle {}", i));
        }
    }

    if spawn.y - half < level.registry.floor_y() {
        out.push("spawn point is below the floor".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tread_physics::ObstacleDef;

    fn build(file: &LevelFile) -> Level {
        file.build_with_config(ControllerConfig::default()).unwrap()
    }

    #[test]
    fn test_default_room_has_no_warnings() {
        let file = LevelFile::default_room();
        let summary = summarize(&file, &build(&file));
        assert!(summary.warnings.is_empty(), "{:?}", summary.warnings);
        assert_eq!(summary.obstacles.len(), 5);
        assert_eq!(summary.obstacles[4].name.as_deref(), Some("crate"));
    }

    #[test]
    fn test_spawn_inside_box_is_flagged() {
        let mut file = LevelFile::default_room();
        file.obstacles
            .push(ObstacleDef::corners("pillar", [-0.5, 0.0, -0.5], [0.5, 4.0, 0.5]));
        let w = warnings(&build(&file));
        assert!(w.iter().any(|m| m.contains("obstacle 5")));
    }

    #[test]
    fn test_zero_volume_box_is_flagged() {
        let mut file = LevelFile::default_room();
        file.obstacles
            .push(ObstacleDef::corners("decal", [7.0, 0.0, 7.0], [8.0, 0.0, 8.0]));
        let w = warnings(&build(&file));
        assert!(w.iter().any(|m| m.contains("zero volume")));
    }

    #[test]
    fn test_summary_serializes() {
        let file = LevelFile::default_room();
        let json = serde_json::to_value(summarize(&file, &build(&file))).unwrap();
        assert_eq!(json["name"], "room");
        assert_eq!(json["obstacles"].as_array().unwrap().len(), 5);
    }
}
