//! Tread Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the frame driver sequences each refresh:
//! - `FrameClock` - wall-clock sampling with a clamped physics delta
//! - `InputState` / `InputIntent` - key tracking and the per-frame movement snapshot
//! - `LockState` - pointer-capture state machine gating the simulation
//! - `ControllerEvent` / `EventBus` - typed event queue for the host
//! - `RenderFrame` / `RenderPort` - the render handoff boundary

mod clock;
mod event;
mod input;
mod lock;
mod render_port;

pub use clock::{FrameClock, DEFAULT_MAX_DELTA};
pub use event::{ControllerEvent, EventBus};
pub use input::{key_code_from_name, InputIntent, InputState};
pub use lock::{LockEvent, LockState};
pub use render_port::{RenderFrame, RenderPort};
