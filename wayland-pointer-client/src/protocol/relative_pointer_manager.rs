//! Get relative pointer objects
//!
//! The relative pointer manager is a global bound from the registry by the surrounding runtime,
//! and adopted into the [`Connection`]. It extends the `wl_pointer` objects of the core protocol
//! with a [`RelativePointer`] reporting relative motion.

use std::sync::Arc;

use super::{
    interfaces::RELATIVE_POINTER_MANAGER_INTERFACE, relative_pointer::RelativePointer,
    wl_pointer::WlPointer,
};
use crate::{
    backend::{
        client::{InvalidId, ObjectData, ObjectId},
        message,
        protocol::{same_interface, Argument, Interface, Message},
    },
    Connection, DispatchError, Proxy,
};

/// Opcode of the `get_relative_pointer` request
pub const REQ_GET_RELATIVE_POINTER_OPCODE: u16 = 0;
#[doc = r" The minimal object version supporting this request"]
pub const REQ_GET_RELATIVE_POINTER_SINCE: u32 = 1u32;

/// Requests of the relative pointer manager
#[derive(Debug)]
#[non_exhaustive]
pub enum Request {
    /// get a relative pointer object
    ///
    /// Creates a new relative pointer for the given `wl_pointer`.
    GetRelativePointer {
        /// the pointer to extend
        pointer: WlPointer,
    },
}

/// This interface has no event
#[derive(Debug)]
pub enum Event {}

proxy_handle!(
    /// The relative pointer manager global
    RelativePointerManager
);

impl Proxy for RelativePointerManager {
    type Request = Request;
    type Event = Event;
    type State = ();

    #[inline]
    fn interface() -> &'static Interface {
        &RELATIVE_POINTER_MANAGER_INTERFACE
    }

    proxy_accessors!(RelativePointerManager);

    fn parse_event(
        _conn: &Connection,
        msg: Message<ObjectId>,
    ) -> Result<(Self, Self::Event), DispatchError> {
        Err(DispatchError::BadMessage {
            sender_id: msg.sender_id,
            interface: Self::interface().name,
            opcode: msg.opcode,
        })
    }

    fn write_request(
        &self,
        conn: &Connection,
        req: Self::Request,
    ) -> Result<(Message<ObjectId>, Option<(&'static Interface, u32)>), InvalidId> {
        match req {
            Request::GetRelativePointer { pointer } => {
                let my_info = conn.object_info(self.id())?;
                Ok((
                    message!(
                        self.id.clone(),
                        REQ_GET_RELATIVE_POINTER_OPCODE,
                        [Argument::NewId(ObjectId::null()), Argument::Object(Proxy::id(&pointer))],
                    ),
                    Some((RelativePointer::interface(), my_info.version)),
                ))
            }
        }
    }
}

impl RelativePointerManager {
    /// Get a relative pointer for `pointer`
    ///
    /// Returns an error, without sending anything, if the manager or the pointer is no longer
    /// alive.
    pub fn get_relative_pointer<U: Send + Sync + 'static>(
        &self,
        conn: &Connection,
        pointer: &WlPointer,
        udata: U,
    ) -> Result<RelativePointer, InvalidId> {
        let ret = conn.send_request(
            self,
            Request::GetRelativePointer { pointer: pointer.clone() },
            Some(conn.make_data::<RelativePointer, U>(udata)),
        )?;
        Proxy::from_id(conn, ret)
    }

    /// Destroy the manager
    ///
    /// Only drops it from the connection: the interface has no destructor request. Relative
    /// pointers it created are not affected.
    pub fn destroy(&self, conn: &Connection) {
        let _ = conn.forget(self);
    }
}
