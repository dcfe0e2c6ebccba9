//! Frame driver: lock state machine and per-refresh sequencing
//!
//! Platform callbacks (`on_key_down`, `on_mouse_motion`, `on_lock_acquired`,
//! ...) only record input. All state changes happen inside [`FrameDriver::frame`],
//! once per display refresh:
//!
//! 1. sample the clock (delta clamped)
//! 2. apply queued lock transitions
//! 3. when locked, apply mouse look, sample the intent, integrate and resolve;
//!    when unlocked, hold velocity at zero
//! 4. hand the pose to the render port

use crate::camera::FirstPersonCamera;
use crate::simulation::Simulation;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tread_runtime::{
    ControllerEvent, EventBus, FrameClock, InputState, LockEvent, LockState, RenderFrame,
    RenderPort,
};
use winit::keyboard::KeyCode;

/// Drives one simulation from platform events and refresh callbacks
pub struct FrameDriver {
    simulation: Simulation,
    clock: FrameClock,
    input: InputState,
    lock: LockState,
    pending_lock: Vec<LockEvent>,
    camera: Option<FirstPersonCamera>,
    events: EventBus,
    render_port: Option<Box<dyn RenderPort>>,
    warned_missing_camera: bool,
}

impl FrameDriver {
    /// Create a driver with a default camera, starting Unlocked
    pub fn new(simulation: Simulation) -> Self {
        let mut driver = Self::without_camera(simulation);
        driver.camera = Some(FirstPersonCamera::default());
        driver
    }

    /// Create a driver whose camera rig is not available yet. Frames are
    /// no-ops until [`FrameDriver::attach_camera`] is called.
    pub fn without_camera(simulation: Simulation) -> Self {
        let clock = FrameClock::with_max_delta(simulation.config().max_delta);
        Self {
            simulation,
            clock,
            input: InputState::new(),
            lock: LockState::Unlocked,
            pending_lock: Vec::new(),
            camera: None,
            events: EventBus::new(),
            render_port: None,
            warned_missing_camera: false,
        }
    }

    pub fn attach_camera(&mut self, camera: FirstPersonCamera) {
        self.camera = Some(camera);
        self.warned_missing_camera = false;
    }

    pub fn set_render_port(&mut self, port: Box<dyn RenderPort>) {
        self.render_port = Some(port);
    }

    // --- Platform callbacks ---

    pub fn on_key_down(&mut self, key: KeyCode) {
        self.input.process_key_down(key);
    }

    pub fn on_key_up(&mut self, key: KeyCode) {
        self.input.process_key_up(key);
    }

    pub fn on_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.input.process_mouse_raw_delta(dx, dy);
    }

    pub fn on_lock_acquired(&mut self) {
        self.pending_lock.push(LockEvent::Acquired);
    }

    pub fn on_lock_released(&mut self) {
        self.pending_lock.push(LockEvent::Released);
    }

    // --- Accessors ---

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn camera(&self) -> Option<&FirstPersonCamera> {
        self.camera.as_ref()
    }

    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        self.events.drain()
    }

    // --- Frame entry points ---

    /// Run one frame against the wall clock
    pub fn frame(&mut self) -> Option<RenderFrame> {
        let delta = self.clock.tick();
        self.run_frame(delta)
    }

    /// Run one frame sampled at `now`
    pub fn frame_at(&mut self, now: Instant) -> Option<RenderFrame> {
        let delta = self.clock.tick_at(now);
        self.run_frame(delta)
    }

    /// Run one frame as if `elapsed` passed since the previous one
    pub fn frame_after(&mut self, elapsed: Duration) -> Option<RenderFrame> {
        let delta = self.clock.advance(elapsed);
        self.run_frame(delta)
    }

    fn run_frame(&mut self, delta: f32) -> Option<RenderFrame> {
        self.apply_lock_events();

        let Some(camera) = self.camera.as_mut() else {
            if !self.warned_missing_camera {
                warn!("camera rig unavailable; skipping simulation");
                self.warned_missing_camera = true;
            }
            self.input.end_frame();
            return None;
        };

        if self.lock.is_locked() {
            let (dx, dy) = self.input.raw_mouse_delta();
            camera.apply_mouse_delta(dx, dy, self.simulation.config().look_sensitivity);

            let intent = self.input.sample_intent();
            let report = self.simulation.step(&intent, &camera.ground_basis(), delta);
            let position = self.simulation.state().position;

            if report.jumped {
                self.events.push(ControllerEvent::Jumped { position });
            }
            if let Some(support) = report.landed_on {
                self.events.push(ControllerEvent::Landed {
                    position,
                    on_obstacle: match support {
                        crate::resolver::Support::Floor => None,
                        crate::resolver::Support::Obstacle(index) => Some(index),
                    },
                });
            }
            for contact in report.blocked {
                self.events.push(ControllerEvent::Blocked {
                    obstacle: contact.obstacle,
                    axis: contact.axis,
                });
            }
        } else {
            self.simulation.hold_still();
            if self.input.sample_intent().jump_released {
                self.simulation.note_jump_released();
            }
        }

        self.input.end_frame();

        let camera = *camera;
        let state = self.simulation.state();
        let frame = RenderFrame {
            frame: self.clock.frame_count,
            delta,
            eye_position: state.position,
            look_direction: camera.look_direction(),
            yaw: camera.yaw,
            pitch: camera.pitch,
            velocity: state.velocity,
            grounded: state.grounded,
            locked: self.lock.is_locked(),
        };

        if let Some(port) = self.render_port.as_mut() {
            port.present(&frame);
        }
        Some(frame)
    }

    fn apply_lock_events(&mut self) {
        for event in std::mem::take(&mut self.pending_lock) {
            if !self.lock.apply(event) {
                continue;
            }
            match event {
                LockEvent::Acquired => {
                    info!("pointer locked; simulation running");
                    self.events.push(ControllerEvent::LockAcquired);
                }
                LockEvent::Released => {
                    // Key-up events stop arriving once capture is lost
                    self.input.release_all();
                    info!("pointer unlocked; simulation paused");
                    self.events.push(ControllerEvent::LockReleased);
                }
            }
        }
    }
}
