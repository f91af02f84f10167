//! Lifecycle of pointer lock and confinement sessions
//!
//! A [`LockedPointer`](crate::protocol::locked_pointer::LockedPointer) or
//! [`ConfinedPointer`](crate::protocol::confined_pointer::ConfinedPointer) starts in the
//! [`Requested`](SessionState::Requested) state. The server activates it once the constraint takes
//! effect, and may later release it. The client may destroy it at any point.
//!
//! ```text
//!              activated               deactivated
//! Requested ──────────────> Active ──────────────> Terminated(Released)
//!     │                       │
//!     └─── deactivated ───────┼──────────────────> Terminated(Released)
//!     └─── destroy ───────────┴──────────────────> Terminated(Destroyed)
//! ```
//!
//! A terminated session never goes back: any event it receives afterwards is a protocol violation.

use std::fmt;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The server lifted the constraint (`unlocked` / `unconfined`)
    ///
    /// The object is defunct but still needs to be destroyed by the client.
    Released,
    /// The client destroyed the object
    Destroyed,
}

/// State of a lock or confinement session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// The constraint was requested but is not in effect yet
    #[default]
    Requested,
    /// The constraint is in effect (`locked` / `confined` received)
    Active,
    /// The session is over
    Terminated(Termination),
}

/// Server events driving a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    /// `locked` or `confined`
    Activated,
    /// `unlocked` or `unconfined`
    Deactivated,
}

/// A server event that is not valid in the current session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    /// State of the session when the event was received
    pub state: SessionState,
    /// The rejected event
    pub event: SessionEvent,
}

impl std::error::Error for TransitionError {}

impl fmt::Display for TransitionError {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not valid for a session in state {:?}", self.event, self.state)
    }
}

impl SessionState {
    /// Apply a server event
    ///
    /// On error the state is left untouched.
    pub fn apply(&mut self, event: SessionEvent) -> Result<(), TransitionError> {
        let next = match (*self, event) {
            (SessionState::Requested, SessionEvent::Activated) => SessionState::Active,
            (SessionState::Requested | SessionState::Active, SessionEvent::Deactivated) => {
                SessionState::Terminated(Termination::Released)
            }
            (state, event) => return Err(TransitionError { state, event }),
        };
        *self = next;
        Ok(())
    }

    /// Record the destruction of the object by the client
    ///
    /// A session already released by the server keeps its [`Termination::Released`] status.
    pub fn destroy(&mut self) {
        if !self.is_terminated() {
            *self = SessionState::Terminated(Termination::Destroyed);
        }
    }

    /// Whether the constraint is currently in effect
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active)
    }

    /// Whether the session is over
    pub fn is_terminated(&self) -> bool {
        matches!(self, SessionState::Terminated(_))
    }
}
