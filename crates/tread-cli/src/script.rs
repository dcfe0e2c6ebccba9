//! Scripted input timelines for headless runs
//!
//! ```toml
//! [[events]]
//! frame = 0
//! lock = true
//!
//! [[events]]
//! frame = 10
//! press = ["KeyW"]
//! mouse = [40.0, 0.0]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tread_physics::FrameDriver;
use tread_runtime::key_code_from_name;

/// Input delivered to the driver just before a given frame runs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptEvent {
    pub frame: u64,
    #[serde(default)]
    pub press: Vec<String>,
    #[serde(default)]
    pub release: Vec<String>,
    /// `true` acquires pointer lock, `false` releases it
    pub lock: Option<bool>,
    /// Raw mouse motion in pixels
    pub mouse: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputScript {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl InputScript {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading input script '{}'", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing input script '{}'", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut script: Self = toml::from_str(content)?;
        script.validate()?;
        // Stable: events on the same frame keep file order
        script.events.sort_by_key(|e| e.frame);
        Ok(script)
    }

    /// The script used when none is given: lock on the first frame, then idle
    pub fn lock_on_start() -> Self {
        Self {
            events: vec![ScriptEvent {
                frame: 0,
                lock: Some(true),
                ..Default::default()
            }],
        }
    }

    fn validate(&self) -> Result<()> {
        for event in &self.events {
            for name in event.press.iter().chain(&event.release) {
                key_code_from_name(name)
                    .with_context(|| format!("event at frame {}", event.frame))?;
            }
        }
        Ok(())
    }

    pub fn events_at(&self, frame: u64) -> impl Iterator<Item = &ScriptEvent> {
        self.events.iter().filter(move |e| e.frame == frame)
    }

    /// Feed every event scheduled for `frame` to the driver
    pub fn apply(&self, frame: u64, driver: &mut FrameDriver) -> Result<()> {
        for event in self.events_at(frame) {
            match event.lock {
                Some(true) => driver.on_lock_acquired(),
                Some(false) => driver.on_lock_released(),
                None => {}
            }
            for name in &event.press {
                driver.on_key_down(key_code_from_name(name)?);
            }
            for name in &event.release {
                driver.on_key_up(key_code_from_name(name)?);
            }
            if let Some([dx, dy]) = event.mouse {
                driver.on_mouse_motion(dx, dy);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tread_core::Vec3;
    use tread_physics::{ControllerConfig, ObstacleRegistry, Simulation};
    use tread_runtime::LockState;

    const SCRIPT: &str = r#"
[[events]]
frame = 5
press = ["KeyW"]

[[events]]
frame = 0
lock = true
mouse = [10.0, -4.0]

[[events]]
frame = 5
release = ["Space"]
"#;

    #[test]
    fn test_parse_and_sort() {
        let script = InputScript::from_toml_str(SCRIPT).unwrap();
        assert_eq!(script.events.len(), 3);
        assert_eq!(script.events[0].frame, 0);
        assert_eq!(script.events[0].mouse, Some([10.0, -4.0]));

        let at_five: Vec<_> = script.events_at(5).collect();
        assert_eq!(at_five.len(), 2);
        assert_eq!(at_five[0].press, vec!["KeyW".to_string()]);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let src = "[[events]]\nframe = 1\npress = [\"KeyWW\"]\n";
        let err = InputScript::from_toml_str(src).unwrap_err();
        assert!(format!("{:#}", err).contains("KeyWW"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let src = "[[events]]\nframe = 1\nhold = [\"KeyW\"]\n";
        assert!(InputScript::from_toml_str(src).is_err());
    }

    #[test]
    fn test_apply_drives_lock_and_keys() {
        let sim = Simulation::new(
            ObstacleRegistry::floor_only(0.0),
            ControllerConfig::default(),
            Vec3::new(0.0, 0.9, 0.0),
        );
        let mut driver = FrameDriver::new(sim);
        let script = InputScript::from_toml_str(SCRIPT).unwrap();

        script.apply(0, &mut driver).unwrap();
        driver.frame_after(std::time::Duration::from_millis(16));
        assert_eq!(driver.lock_state(), LockState::Locked);

        script.apply(5, &mut driver).unwrap();
        assert!(driver.input_mut().sample_intent().forward);
    }

    #[test]
    fn test_default_script_locks_on_first_frame() {
        let script = InputScript::lock_on_start();
        assert_eq!(script.events_at(0).count(), 1);
        assert_eq!(script.events_at(1).count(), 0);
    }
}
