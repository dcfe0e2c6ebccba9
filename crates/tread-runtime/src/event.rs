//! Events emitted by the controller for the host to consume

use serde::Serialize;
use tread_core::{Axis, Vec3};

/// Something notable that happened during a frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerEvent {
    /// Pointer capture acquired; simulation resumes
    LockAcquired,
    /// Pointer capture released; simulation paused
    LockReleased,
    /// A jump impulse was applied
    Jumped { position: Vec3 },
    /// The player went from airborne to grounded. `on_obstacle` is the
    /// registry index of the box top landed on, or `None` for the floor.
    Landed {
        position: Vec3,
        on_obstacle: Option<usize>,
    },
    /// Horizontal movement was stopped by a box face
    Blocked { obstacle: usize, axis: Axis },
}

/// Events collected during frames, in the order they happened, until the host
/// takes them
#[derive(Debug, Default)]
pub struct EventBus {
    pending: Vec<ControllerEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ControllerEvent) {
        self.pending.push(event);
    }

    /// Take everything queued so far, leaving the bus empty
    pub fn drain(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_keeps_order_and_empties() {
        let mut bus = EventBus::new();
        bus.push(ControllerEvent::LockAcquired);
        bus.push(ControllerEvent::Blocked {
            obstacle: 2,
            axis: Axis::X,
        });

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                ControllerEvent::LockAcquired,
                ControllerEvent::Blocked {
                    obstacle: 2,
                    axis: Axis::X
                },
            ]
        );
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_landed_serializes_with_kind_tag() {
        let event = ControllerEvent::Landed {
            position: Vec3::new(0.0, 0.9, 0.0),
            on_obstacle: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "landed");
        assert!(json["on_obstacle"].is_null());
    }
}
