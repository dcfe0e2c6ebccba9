//! Headless simulation command

use super::OutputFormat;
use crate::script::InputScript;
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::info;
use tread_physics::{FrameDriver, LevelFile};
use tread_runtime::{ControllerEvent, RenderFrame};

pub struct SimulateArgs {
    pub level: String,
    pub frames: u64,
    pub dt: f32,
    pub script: Option<String>,
    pub format: OutputFormat,
}

/// One frame of output: the pose plus whatever happened during it
#[derive(Debug, Serialize)]
pub struct FrameRecord {
    #[serde(flatten)]
    pub frame: RenderFrame,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<ControllerEvent>,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if !(args.dt.is_finite() && args.dt >= 0.0) {
        anyhow::bail!("--dt must be a non-negative number of seconds, got {}", args.dt);
    }

    let file = LevelFile::load(&args.level)
        .with_context(|| format!("loading level '{}'", args.level))?;
    let level = file
        .build()
        .with_context(|| format!("level '{}' is invalid", args.level))?;

    let script = match &args.script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::lock_on_start(),
    };

    info!(
        level = %level.name,
        frames = args.frames,
        dt = args.dt,
        "simulating"
    );

    let records = simulate(driver_for(level)?, &script, args.frames, args.dt)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text => {
            for record in &records {
                println!("{}", format_line(&record.frame));
                for event in &record.events {
                    println!("      {:?}", event);
                }
            }
        }
    }

    if let Some(last) = records.last() {
        info!(
            x = last.frame.eye_position.x,
            y = last.frame.eye_position.y,
            z = last.frame.eye_position.z,
            grounded = last.frame.grounded,
            "final pose"
        );
    }
    Ok(())
}

fn driver_for(level: tread_physics::Level) -> Result<FrameDriver> {
    let mut input = tread_runtime::InputState::new();
    level
        .apply_bindings(&mut input)
        .context("applying level key bindings")?;
    let mut driver = FrameDriver::new(level.into_simulation());
    *driver.input_mut() = input;
    Ok(driver)
}

/// Run `frames` frames of `dt` seconds each, feeding scripted input first
pub fn simulate(
    mut driver: FrameDriver,
    script: &InputScript,
    frames: u64,
    dt: f32,
) -> Result<Vec<FrameRecord>> {
    let interval = Duration::try_from_secs_f32(dt)
        .with_context(|| format!("--dt {} is not a usable frame interval", dt))?;
    let mut records = Vec::new();

    for n in 0..frames {
        script.apply(n, &mut driver)?;
        if let Some(frame) = driver.frame_after(interval) {
            records.push(FrameRecord {
                frame,
                events: driver.drain_events(),
            });
        }
    }
    Ok(records)
}

fn format_line(f: &RenderFrame) -> String {
    format!(
        "{:>5}  pos ({:8.3}, {:8.3}, {:8.3})  vel ({:7.3}, {:7.3}, {:7.3})  {:<6} {}",
        f.frame,
        f.eye_position.x,
        f.eye_position.y,
        f.eye_position.z,
        f.velocity.x,
        f.velocity.y,
        f.velocity.z,
        if f.grounded { "ground" } else { "air" },
        if f.locked { "locked" } else { "unlocked" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tread_physics::ControllerConfig;

    fn room_driver() -> FrameDriver {
        let level = LevelFile::default_room()
            .build_with_config(ControllerConfig::default())
            .unwrap();
        driver_for(level).unwrap()
    }

    #[test]
    fn test_default_script_stands_still_on_floor() {
        let records =
            simulate(room_driver(), &InputScript::lock_on_start(), 90, 1.0 / 60.0).unwrap();
        assert_eq!(records.len(), 90);
        assert_eq!(records[0].events[0], ControllerEvent::LockAcquired);

        let last = &records[89].frame;
        assert!(last.locked);
        assert!(last.grounded);
        assert!((last.eye_position.y - 0.9).abs() < 1e-5);
        assert_eq!(last.eye_position.x, 0.0);
    }

    #[test]
    fn test_walk_forward_into_north_wall() {
        let script = InputScript::from_toml_str(
            "[[events]]\nframe = 0\nlock = true\n\n[[events]]\nframe = 30\npress = [\"KeyW\"]\n",
        )
        .unwrap();
        let records = simulate(room_driver(), &script, 300, 1.0 / 60.0).unwrap();

        // North wall inner face is at z = -9.5
        let z = records.last().unwrap().frame.eye_position.z;
        assert!(z > -9.5 + 0.4 - 1e-4 && z < -9.0, "z = {z}");
        assert!(records
            .iter()
            .flat_map(|r| &r.events)
            .any(|e| matches!(e, ControllerEvent::Blocked { obstacle: 0, .. })));
    }

    #[test]
    fn test_unlocked_run_does_not_move() {
        let records = simulate(room_driver(), &InputScript::default(), 30, 1.0 / 60.0).unwrap();
        let last = &records[29].frame;
        assert!(!last.locked);
        assert_eq!(last.eye_position.y, 1.8);
    }

    #[test]
    fn test_records_serialize_flat() {
        let records =
            simulate(room_driver(), &InputScript::lock_on_start(), 2, 1.0 / 60.0).unwrap();
        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(json[0]["frame"], 1);
        assert_eq!(json[0]["events"][0]["kind"], "lock_acquired");
        assert!(json[1].get("events").is_none());
    }

    #[test]
    fn test_unusable_dt_is_an_error() {
        let script = InputScript::lock_on_start();
        assert!(simulate(room_driver(), &script, 1, 1.0e30).is_err());
        assert!(simulate(room_driver(), &script, 1, -1.0).is_err());
        assert!(simulate(room_driver(), &script, 1, f32::NAN).is_err());
    }

    #[test]
    fn test_dt_beyond_instant_range_does_not_panic() {
        let records = simulate(room_driver(), &InputScript::lock_on_start(), 2, 1.0e15).unwrap();
        assert_eq!(records.len(), 2);
        assert!((records[1].frame.delta - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_large_dt_is_clamped_per_frame() {
        let records = simulate(room_driver(), &InputScript::lock_on_start(), 3, 60.0).unwrap();
        assert!(records.iter().all(|r| (r.frame.delta - 0.05).abs() < 1e-6));
    }

    #[test]
    fn test_text_line_shape() {
        let records =
            simulate(room_driver(), &InputScript::lock_on_start(), 1, 1.0 / 60.0).unwrap();
        let line = format_line(&records[0].frame);
        assert!(line.contains("pos ("));
        assert!(line.ends_with("locked"));
    }
}
