//! Client bindings to the Wayland pointer-lock and relative-pointer extensions
//!
//! This crate exposes the two extensions as strongly typed protocol objects:
//!
//! - [`PointerLockManager`](protocol::pointer_lock::PointerLockManager) creates
//!   [`LockedPointer`](protocol::locked_pointer::LockedPointer) and
//!   [`ConfinedPointer`](protocol::confined_pointer::ConfinedPointer) sessions, which freeze the
//!   pointer in place or keep it inside a region while the surface has focus;
//! - [`RelativePointerManager`](protocol::relative_pointer_manager::RelativePointerManager) creates
//!   [`RelativePointer`](protocol::relative_pointer::RelativePointer) objects, which report
//!   pointer motion as deltas, both accelerated and unaccelerated.
//!
//! ## Connection and objects
//!
//! A [`Connection`] wraps the object table of the underlying
//! [`Backend`](backend::client::Backend). The socket itself belongs to an external runtime, which
//! implements [`Transport`](backend::client::Transport) to carry requests, and feeds the events
//! it receives to [`Connection::dispatch()`].
//!
//! The manager globals and the core objects the extensions take as arguments (surfaces, seats,
//! regions, pointers) are created by that runtime as well. They are registered with
//! [`Connection::adopt()`], which gives back a typed handle.
//!
//! ## Event handling
//!
//! Every object has at most one event handler, set with [`Proxy::quick_assign()`]. Assigning a new
//! handler replaces the previous one. Handlers are invoked synchronously from
//! [`Connection::dispatch()`], in the order the events were received.
//!
//! Lock and confinement sessions additionally track their lifecycle as a
//! [`SessionState`](session::SessionState), available from [`Proxy::state()`]. An event that is not
//! valid in the current state is a protocol error, which kills the connection.
//!
//! ## Logging
//!
//! With the default `log` cargo feature, requests and events are traced through the `log` crate at
//! debug level, and protocol errors are logged at error level.

#![warn(missing_docs, missing_debug_implementations)]
#![forbid(unsafe_code)]
#![cfg_attr(unstable_coverage, feature(coverage_attribute))]

use std::sync::Arc;

/// Reexport of the backend crate
pub extern crate wayland_pointer_backend as backend;

use backend::{
    client::{InvalidId, ObjectData, ObjectId, INVALID_METHOD},
    protocol::{Interface, Message, ProtocolError},
};

// internal imports for dispatching logging depending on the `log` feature
#[cfg(feature = "log")]
#[allow(unused_imports)]
use log::{debug as log_debug, error as log_error, info as log_info, warn as log_warn};
#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
use std::{
    eprintln as log_error, eprintln as log_warn, eprintln as log_info, eprintln as log_debug,
};

mod conn;
mod proxy_data;
pub mod protocol;
pub mod session;

pub use backend::client::WaylandError;
pub use backend::fixed::DoubleFixed;
pub use conn::Connection;
pub use proxy_data::ProxyData;

use session::TransitionError;

/// Trait representing a Wayland object of a given interface
///
/// Handles implementing it are cheap to clone: every clone refers to the same protocol object.
pub trait Proxy: Clone + std::fmt::Debug + Send + Sync + Sized + 'static {
    /// The request enum for this interface
    type Request: std::fmt::Debug + 'static;
    /// The event enum for this interface
    type Event: std::fmt::Debug + 'static;
    /// The lifecycle state tracked for every object of this interface
    type State: std::fmt::Debug + Default + Clone + Send + 'static;

    /// The interface description
    fn interface() -> &'static Interface;

    /// The ID of this object
    fn id(&self) -> ObjectId;

    /// The version of this object
    fn version(&self) -> u32;

    /// Access the raw data associated with this object.
    fn object_data(&self) -> Option<&Arc<dyn ObjectData>>;

    /// Create an object handle from its ID
    ///
    /// Returns an error if the ID refers to an object with a different interface than
    /// the one of this type.
    fn from_id(conn: &Connection, id: ObjectId) -> Result<Self, InvalidId>;

    /// Parse an event for this object
    ///
    /// **Note:** This method is mostly meant as an implementation detail.
    fn parse_event(
        conn: &Connection,
        msg: Message<ObjectId>,
    ) -> Result<(Self, Self::Event), DispatchError>;

    /// Serialize a request for this object
    ///
    /// Returns the message together with the interface and version of the object it creates,
    /// if any.
    ///
    /// **Note:** This method is mostly meant as an implementation detail.
    #[allow(clippy::type_complexity)]
    fn write_request(
        &self,
        conn: &Connection,
        req: Self::Request,
    ) -> Result<(Message<ObjectId>, Option<(&'static Interface, u32)>), InvalidId>;

    /// Update the object state for an incoming event
    ///
    /// An error means the event is not valid in the current state. The default implementation
    /// accepts every event.
    fn apply_event(_state: &mut Self::State, _event: &Self::Event) -> Result<(), TransitionError> {
        Ok(())
    }

    /// Update the object state when the client destroys the object
    fn apply_destroyed(_state: &mut Self::State) {}

    /// Access the user data associated with this object
    ///
    /// Returns `None` if the object has no data managed by this crate, or if it is not of
    /// type `U`.
    fn data<U: Send + Sync + 'static>(&self) -> Option<&U> {
        self.proxy_data().and_then(|data| data.udata.downcast_ref::<U>())
    }

    /// A snapshot of the lifecycle state of this object
    fn state(&self) -> Option<Self::State> {
        self.proxy_data().map(ProxyData::state)
    }

    /// Set the event handler of this object
    ///
    /// Any previously assigned handler is dropped. Events received while no handler is assigned
    /// still update the object state, but are otherwise ignored.
    fn quick_assign<F>(&self, handler: F)
    where
        F: FnMut(&Connection, &Self, Self::Event) + Send + 'static,
    {
        match self.proxy_data() {
            Some(data) => data.assign(Box::new(handler)),
            None => crate::log_warn!(
                "Cannot assign a handler to {}: its data is not managed by wayland-pointer-client",
                self.id()
            ),
        }
    }

    /// Check if the object is still alive on this connection
    fn is_alive(&self, conn: &Connection) -> bool {
        conn.object_info(self.id()).is_ok()
    }

    #[doc(hidden)]
    fn proxy_data(&self) -> Option<&ProxyData<Self>> {
        self.object_data().and_then(|arc| (**arc).downcast_ref::<ProxyData<Self>>())
    }
}

/// An error when trying to dispatch an event to an object
#[derive(Debug, Clone)]
pub enum DispatchError {
    /// The received message does not match the description of the object's interface.
    BadMessage {
        /// The id of the target object
        sender_id: ObjectId,
        /// The interface of the target object
        interface: &'static str,
        /// The opcode number
        opcode: u16,
    },
    /// The event is not valid in the current state of the object
    InvalidTransition {
        /// The id of the target object
        sender_id: ObjectId,
        /// The rejected transition
        error: TransitionError,
    },
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::BadMessage { .. } => None,
            DispatchError::InvalidTransition { error, .. } => Some(error),
        }
    }
}

impl std::fmt::Display for DispatchError {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::BadMessage { sender_id, interface, opcode } => {
                write!(f, "Bad message for object {interface}@{} on opcode {opcode}", sender_id.protocol_id())
            }
            DispatchError::InvalidTransition { sender_id, error } => {
                write!(f, "Invalid event for object {sender_id}: {error}")
            }
        }
    }
}

impl From<DispatchError> for ProtocolError {
    fn from(err: DispatchError) -> ProtocolError {
        let sender_id = match err {
            DispatchError::BadMessage { ref sender_id, .. }
            | DispatchError::InvalidTransition { ref sender_id, .. } => sender_id.clone(),
        };
        ProtocolError {
            code: INVALID_METHOD,
            object_id: sender_id.protocol_id(),
            object_interface: sender_id.interface().name.into(),
            message: err.to_string(),
        }
    }
}
