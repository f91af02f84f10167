//! A pointer lock session
//!
//! While the lock is active, the pointer does not move: the compositor keeps reporting relative
//! motion, but no absolute motion. The lifecycle of the session is tracked as a
//! [`SessionState`], available through [`Proxy::state()`].

use std::sync::Arc;

use super::interfaces::LOCKED_POINTER_INTERFACE;
use crate::{
    backend::{
        client::{InvalidId, ObjectData, ObjectId},
        fixed::fixed_from_f64,
        message,
        protocol::{same_interface, Argument, Interface, Message},
    },
    session::{SessionEvent, SessionState, TransitionError},
    Connection, DispatchError, Proxy,
};

/// Opcode of the `set_cursor_position_hint` request
pub const REQ_SET_CURSOR_POSITION_HINT_OPCODE: u16 = 0;
/// Opcode of the `destroy` request
pub const REQ_DESTROY_OPCODE: u16 = 1;
/// Opcode of the `locked` event
pub const EVT_LOCKED_OPCODE: u16 = 0;
/// Opcode of the `unlocked` event
pub const EVT_UNLOCKED_OPCODE: u16 = 1;
#[doc = r" The minimal object version supporting this request"]
pub const REQ_SET_CURSOR_POSITION_HINT_SINCE: u32 = 1u32;
#[doc = r" The minimal object version supporting this request"]
pub const REQ_DESTROY_SINCE: u32 = 1u32;
#[doc = r" The minimal object version supporting this event"]
pub const EVT_LOCKED_SINCE: u32 = 1u32;
#[doc = r" The minimal object version supporting this event"]
pub const EVT_UNLOCKED_SINCE: u32 = 1u32;

/// Requests of a locked pointer
#[derive(Debug)]
#[non_exhaustive]
pub enum Request {
    /// set the pointer cursor position hint
    ///
    /// Tells the compositor where the cursor is drawn by the client, in surface-local
    /// coordinates. The compositor may warp the pointer there once the lock ends.
    SetCursorPositionHint {
        /// surface-local x coordinate
        surface_x: f64,
        /// surface-local y coordinate
        surface_y: f64,
    },
    /// destroy the locked pointer object
    ///
    /// This is a destructor, once sent this object cannot be used any longer.
    Destroy,
}

/// Events of a locked pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// the lock is in effect
    Locked,
    /// the lock was lifted by the compositor
    ///
    /// The object is defunct afterwards, and should be destroyed.
    Unlocked,
}

proxy_handle!(
    /// A pointer lock session
    LockedPointer
);

impl Proxy for LockedPointer {
    type Request = Request;
    type Event = Event;
    type State = SessionState;

    #[inline]
    fn interface() -> &'static Interface {
        &LOCKED_POINTER_INTERFACE
    }

    proxy_accessors!(LockedPointer);

    fn parse_event(
        conn: &Connection,
        msg: Message<ObjectId>,
    ) -> Result<(Self, Self::Event), DispatchError> {
        let me = Self::from_id(conn, msg.sender_id.clone()).map_err(|_| DispatchError::BadMessage {
            sender_id: msg.sender_id.clone(),
            interface: Self::interface().name,
            opcode: msg.opcode,
        })?;
        match (msg.opcode, &msg.args[..]) {
            (EVT_LOCKED_OPCODE, []) => Ok((me, Event::Locked)),
            (EVT_UNLOCKED_OPCODE, []) => Ok((me, Event::Unlocked)),
            _ => Err(DispatchError::BadMessage {
                sender_id: msg.sender_id,
                interface: Self::interface().name,
                opcode: msg.opcode,
            }),
        }
    }

    fn write_request(
        &self,
        conn: &Connection,
        req: Self::Request,
    ) -> Result<(Message<ObjectId>, Option<(&'static Interface, u32)>), InvalidId> {
        conn.object_info(self.id())?;
        match req {
            Request::SetCursorPositionHint { surface_x, surface_y } => Ok((
                message!(
                    self.id.clone(),
                    REQ_SET_CURSOR_POSITION_HINT_OPCODE,
                    [
                        Argument::Fixed(fixed_from_f64(surface_x)),
                        Argument::Fixed(fixed_from_f64(surface_y)),
                    ],
                ),
                None,
            )),
            Request::Destroy => Ok((message!(self.id.clone(), REQ_DESTROY_OPCODE, []), None)),
        }
    }

    fn apply_event(state: &mut SessionState, event: &Event) -> Result<(), TransitionError> {
        state.apply(match event {
            Event::Locked => SessionEvent::Activated,
            Event::Unlocked => SessionEvent::Deactivated,
        })
    }

    fn apply_destroyed(state: &mut SessionState) {
        state.destroy();
    }
}

impl LockedPointer {
    /// Set the cursor position hint, in surface-local coordinates
    ///
    /// Accepted while the lock is requested or active. Returns an error without sending anything
    /// once the session is over.
    pub fn set_cursor_position_hint(
        &self,
        conn: &Connection,
        surface_x: f64,
        surface_y: f64,
    ) -> Result<(), InvalidId> {
        if self.state().is_some_and(|state| state.is_terminated()) {
            return Err(InvalidId);
        }
        conn.send_request(self, Request::SetCursorPositionHint { surface_x, surface_y }, None)?;
        Ok(())
    }

    /// Destroy the locked pointer
    ///
    /// Ends the session if it is still live. A session already ended by the compositor must still
    /// be destroyed to free it.
    pub fn destroy(&self, conn: &Connection) {
        let _ = conn.send_request(self, Request::Destroy, None);
    }
}
