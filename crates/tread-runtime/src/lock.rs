//! Pointer-capture lock state machine
//!
//! The simulation only advances while the pointer is captured. Capture is
//! acquired and released by the platform layer; the frame driver feeds those
//! notifications in as [`LockEvent`]s.

use tracing::debug;

/// Whether pointer capture is active
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LockState {
    /// Capture inactive: velocity is held at zero, no simulation runs
    #[default]
    Unlocked,
    /// Capture active: full simulation runs every frame
    Locked,
}

/// Notification from the pointer-capture collaborator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockEvent {
    Acquired,
    Released,
}

impl LockState {
    pub fn is_locked(self) -> bool {
        self == LockState::Locked
    }

    /// Apply an event, returning true when the state changed.
    /// Acquiring while locked or releasing while unlocked is ignored.
    pub fn apply(&mut self, event: LockEvent) -> bool {
        let next = match (*self, event) {
            (LockState::Unlocked, LockEvent::Acquired) => LockState::Locked,
            (LockState::Locked, LockEvent::Released) => LockState::Unlocked,
            (state, event) => {
                debug!(?state, ?event, "ignoring redundant lock event");
                return false;
            }
        };
        *self = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unlocked() {
        assert_eq!(LockState::default(), LockState::Unlocked);
        assert!(!LockState::default().is_locked());
    }

    #[test]
    fn test_transitions() {
        let mut state = LockState::Unlocked;
        assert!(state.apply(LockEvent::Acquired));
        assert!(state.is_locked());

        assert!(state.apply(LockEvent::Released));
        assert_eq!(state, LockState::Unlocked);
    }

    #[test]
    fn test_redundant_events_ignored() {
        let mut state = LockState::Unlocked;
        assert!(!state.apply(LockEvent::Released));
        assert_eq!(state, LockState::Unlocked);

        state.apply(LockEvent::Acquired);
        assert!(!state.apply(LockEvent::Acquired));
        assert!(state.is_locked());
    }
}
