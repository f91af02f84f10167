//! A pointer confinement session
//!
//! While the confinement is active, the pointer cannot leave the confinement region of the
//! surface. The session follows the same lifecycle as a
//! [`LockedPointer`](super::locked_pointer::LockedPointer).

use std::sync::Arc;

use super::interfaces::CONFINED_POINTER_INTERFACE;
use crate::{
    backend::{
        client::{InvalidId, ObjectData, ObjectId},
        message,
        protocol::{same_interface, Interface, Message},
    },
    session::{SessionEvent, SessionState, TransitionError},
    Connection, DispatchError, Proxy,
};

/// Opcode of the `destroy` request
pub const REQ_DESTROY_OPCODE: u16 = 0;
/// Opcode of the `confined` event
pub const EVT_CONFINED_OPCODE: u16 = 0;
/// Opcode of the `unconfined` event
pub const EVT_UNCONFINED_OPCODE: u16 = 1;
#[doc = r" The minimal object version supporting this request"]
pub const REQ_DESTROY_SINCE: u32 = 1u32;
#[doc = r" The minimal object version supporting this event"]
pub const EVT_CONFINED_SINCE: u32 = 1u32;
#[doc = r" The minimal object version supporting this event"]
pub const EVT_UNCONFINED_SINCE: u32 = 1u32;

/// Requests of a confined pointer
#[derive(Debug)]
#[non_exhaustive]
pub enum Request {
    /// destroy the confined pointer object
    ///
    /// This is a destructor, once sent this object cannot be used any longer.
    Destroy,
}

/// Events of a confined pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// the confinement is in effect
    Confined,
    /// the confinement was lifted by the compositor
    ///
    /// The object is defunct afterwards, and should be destroyed.
    Unconfined,
}

proxy_handle!(
    /// A pointer confinement session
    ConfinedPointer
);

impl Proxy for ConfinedPointer {
    type Request = Request;
    type Event = Event;
    type State = SessionState;

    #[inline]
    fn interface() -> &'static Interface {
        &CONFINED_POINTER_INTERFACE
    }

    proxy_accessors!(ConfinedPointer);

    fn parse_event(
        conn: &Connection,
        msg: Message<ObjectId>,
    ) -> Result<(Self, Self::Event), DispatchError> {
        let event = match (msg.opcode, &msg.args[..]) {
            (EVT_CONFINED_OPCODE, []) => Event::Confined,
            (EVT_UNCONFINED_OPCODE, []) => Event::Unconfined,
            _ => {
                return Err(DispatchError::BadMessage {
                    sender_id: msg.sender_id,
                    interface: Self::interface().name,
                    opcode: msg.opcode,
                })
            }
        };
        match Self::from_id(conn, msg.sender_id.clone()) {
            Ok(me) => Ok((me, event)),
            Err(_) => Err(DispatchError::BadMessage {
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
            Request::Destroy => Ok((message!(self.id.clone(), REQ_DESTROY_OPCODE, []), None)),
        }
    }

    fn apply_event(state: &mut SessionState, event: &Event) -> Result<(), TransitionError> {
        state.apply(match event {
            Event::Confined => SessionEvent::Activated,
            Event::Unconfined => SessionEvent::Deactivated,
        })
    }

    fn apply_destroyed(state: &mut SessionState) {
        state.destroy();
    }
}

impl ConfinedPointer {
    /// Destroy the confined pointer
    ///
    /// Ends the session if it is still live. A session already ended by the compositor must still
    /// be destroyed to free it.
    pub fn destroy(&self, conn: &Connection) {
        let _ = conn.send_request(self, Request::Destroy, None);
    }
}
