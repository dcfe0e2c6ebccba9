//! Input state management and per-frame intent sampling

use std::collections::{HashMap, HashSet};
use tread_core::{Result, TreadError};
use winit::keyboard::KeyCode;

/// Snapshot of the player's movement intent for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Jump was pressed this frame (edge)
    pub jump_requested: bool,
    /// Jump was released this frame (edge)
    pub jump_released: bool,
}

/// Tracks keyboard and raw mouse input between frames.
///
/// Platform callbacks only ever touch this holder; the simulation reads it
/// once per frame through [`InputState::sample_intent`].
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame
    keys_just_released: HashSet<KeyCode>,

    /// Raw accumulated mouse delta (for cursor-locked mode)
    raw_mouse_delta: (f64, f64),

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
            raw_mouse_delta: (0.0, 0.0),
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert("move_forward".into(), vec![KeyCode::KeyW, KeyCode::ArrowUp]);
        map.insert("move_backward".into(), vec![KeyCode::KeyS, KeyCode::ArrowDown]);
        map.insert("move_left".into(), vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
        map.insert("move_right".into(), vec![KeyCode::KeyD, KeyCode::ArrowRight]);
        map.insert("jump".into(), vec![KeyCode::Space]);
        map
    }

    /// Bind an action to one or more keys, replacing previous bindings
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Bind an action using key names such as `"KeyW"` or `"Space"`
    pub fn bind_action_names<S: AsRef<str>>(&mut self, action: &str, names: &[S]) -> Result<()> {
        let keys = names
            .iter()
            .map(|n| key_code_from_name(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.bind_action(action, keys);
        Ok(())
    }

    /// Process a key press event. Auto-repeat presses of a held key are not edges.
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_just_released.insert(key);
    }

    /// Process raw mouse delta (device motion, for locked cursor)
    pub fn process_mouse_raw_delta(&mut self, dx: f64, dy: f64) {
        self.raw_mouse_delta.0 += dx;
        self.raw_mouse_delta.1 += dy;
    }

    /// Drop all held keys, e.g. when pointer capture is lost
    pub fn release_all(&mut self) {
        let held: Vec<KeyCode> = self.keys_down.drain().collect();
        self.keys_just_released.extend(held);
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.raw_mouse_delta = (0.0, 0.0);
    }

    // --- Query methods ---

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Was a key pressed this frame?
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Is an action currently held?
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.any_bound_key_in(action, &self.keys_down)
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.any_bound_key_in(action, &self.keys_just_pressed)
    }

    /// Was an action just released this frame?
    pub fn is_action_just_released(&self, action: &str) -> bool {
        self.any_bound_key_in(action, &self.keys_just_released)
    }

    fn any_bound_key_in(&self, action: &str, set: &HashSet<KeyCode>) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| set.contains(k)))
            .unwrap_or(false)
    }

    /// Get the raw mouse delta (accumulated device motion)
    pub fn raw_mouse_delta(&self) -> (f64, f64) {
        self.raw_mouse_delta
    }

    /// Build this frame's movement snapshot
    pub fn sample_intent(&self) -> InputIntent {
        InputIntent {
            forward: self.is_action_pressed("move_forward"),
            backward: self.is_action_pressed("move_backward"),
            left: self.is_action_pressed("move_left"),
            right: self.is_action_pressed("move_right"),
            jump_requested: self.is_action_just_pressed("jump"),
            jump_released: self.is_action_just_released("jump"),
        }
    }
}

/// Parse a winit key code name as used in level and script files
pub fn key_code_from_name(name: &str) -> Result<KeyCode> {
    let key = match name {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Space" => KeyCode::Space,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "Escape" => KeyCode::Escape,
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        _ => return Err(TreadError::UnknownKey(name.to_string())),
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_transitions() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::KeyW);
        assert!(input.is_key_down(KeyCode::KeyW));
        assert!(input.is_key_just_pressed(KeyCode::KeyW));

        // End frame clears just_pressed
        input.end_frame();
        assert!(input.is_key_down(KeyCode::KeyW));
        assert!(!input.is_key_just_pressed(KeyCode::KeyW));

        input.process_key_up(KeyCode::KeyW);
        assert!(!input.is_key_down(KeyCode::KeyW));
    }

    #[test]
    fn test_auto_repeat_is_not_an_edge() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::Space);
        input.end_frame();
        input.process_key_down(KeyCode::Space);
        assert!(!input.sample_intent().jump_requested);
    }

    #[test]
    fn test_sample_intent_flags() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyW);
        input.process_key_down(KeyCode::KeyD);
        input.process_key_down(KeyCode::Space);

        let intent = input.sample_intent();
        assert!(intent.forward && intent.right);
        assert!(!intent.backward && !intent.left);
        assert!(intent.jump_requested);
        assert!(!intent.jump_released);

        input.end_frame();
        input.process_key_up(KeyCode::Space);
        let intent = input.sample_intent();
        assert!(!intent.jump_requested);
        assert!(intent.jump_released);
    }

    #[test]
    fn test_arrow_keys_are_secondary_bindings() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::ArrowLeft);
        assert!(input.sample_intent().left);
    }

    #[test]
    fn test_custom_binding() {
        let mut input = InputState::new();
        input.bind_action_names("jump", &["KeyJ"]).unwrap();

        input.process_key_down(KeyCode::Space);
        assert!(!input.is_action_pressed("jump"));

        input.process_key_down(KeyCode::KeyJ);
        assert!(input.is_action_just_pressed("jump"));
    }

    #[test]
    fn test_unknown_key_name() {
        let mut input = InputState::new();
        let err = input.bind_action_names("jump", &["Hyper"]).unwrap_err();
        assert!(matches!(err, TreadError::UnknownKey(ref k) if k == "Hyper"));
    }

    #[test]
    fn test_release_all_reports_releases() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::KeyW);
        input.process_key_down(KeyCode::Space);
        input.release_all();

        let intent = input.sample_intent();
        assert!(!intent.forward);
        assert!(intent.jump_released);
    }

    #[test]
    fn test_mouse_delta_accumulates_and_clears() {
        let mut input = InputState::new();
        input.process_mouse_raw_delta(3.0, -1.0);
        input.process_mouse_raw_delta(2.0, -1.0);
        assert_eq!(input.raw_mouse_delta(), (5.0, -2.0));

        input.end_frame();
        assert_eq!(input.raw_mouse_delta(), (0.0, 0.0));
    }
}
