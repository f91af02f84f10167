//! Relative pointer motion
//!
//! A relative pointer reports every pointer motion as a delta, twice: once with the pointer
//! acceleration applied as it is for the cursor, and once as reported by the input device. Deltas
//! are sent even when the cursor cannot move, for instance while it is locked or against the edge
//! of the screen.

use std::sync::Arc;

use super::interfaces::RELATIVE_POINTER_INTERFACE;
use crate::{
    backend::{
        client::{InvalidId, ObjectData, ObjectId},
        message,
        protocol::{same_interface, Argument, Interface, Message},
    },
    Connection, DispatchError, DoubleFixed, Proxy,
};

/// Opcode of the `release` request
pub const REQ_RELEASE_OPCODE: u16 = 0;
/// Opcode of the `relative_motion` event
pub const EVT_RELATIVE_MOTION_OPCODE: u16 = 0;
#[doc = r" The minimal object version supporting this request"]
pub const REQ_RELEASE_SINCE: u32 = 1u32;
#[doc = r" The minimal object version supporting this event"]
pub const EVT_RELATIVE_MOTION_SINCE: u32 = 1u32;

/// Requests of a relative pointer
#[derive(Debug)]
#[non_exhaustive]
pub enum Request {
    /// release the relative pointer object
    ///
    /// This is a destructor, once sent this object cannot be used any longer.
    Release,
}

/// Events of a relative pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// relative pointer motion
    RelativeMotion {
        /// timestamp in milliseconds, with an undefined base
        time: u32,
        /// x component of the motion vector
        dx: DoubleFixed,
        /// y component of the motion vector
        dy: DoubleFixed,
        /// x component of the unaccelerated motion vector
        dx_unaccel: DoubleFixed,
        /// y component of the unaccelerated motion vector
        dy_unaccel: DoubleFixed,
    },
}

proxy_handle!(
    /// A relative pointer
    RelativePointer
);

impl Proxy for RelativePointer {
    type Request = Request;
    type Event = Event;
    type State = ();

    #[inline]
    fn interface() -> &'static Interface {
        &RELATIVE_POINTER_INTERFACE
    }

    proxy_accessors!(RelativePointer);

    fn parse_event(
        conn: &Connection,
        msg: Message<ObjectId>,
    ) -> Result<(Self, Self::Event), DispatchError> {
        let bad_message = |msg: &Message<ObjectId>| DispatchError::BadMessage {
            sender_id: msg.sender_id.clone(),
            interface: Self::interface().name,
            opcode: msg.opcode,
        };
        let me = Self::from_id(conn, msg.sender_id.clone()).map_err(|_| bad_message(&msg))?;
        match msg.opcode {
            EVT_RELATIVE_MOTION_OPCODE => {
                if let [Argument::Uint(time), Argument::Int(dx_int), Argument::Int(dx_frac), Argument::Int(dy_int), Argument::Int(dy_frac), Argument::Int(dx_unaccel_int), Argument::Int(dx_unaccel_frac), Argument::Int(dy_unaccel_int), Argument::Int(dy_unaccel_frac)] =
                    &msg.args[..]
                {
                    Ok((
                        me,
                        Event::RelativeMotion {
                            time: *time,
                            dx: DoubleFixed::from_parts(*dx_int, *dx_frac),
                            dy: DoubleFixed::from_parts(*dy_int, *dy_frac),
                            dx_unaccel: DoubleFixed::from_parts(*dx_unaccel_int, *dx_unaccel_frac),
                            dy_unaccel: DoubleFixed::from_parts(*dy_unaccel_int, *dy_unaccel_frac),
                        },
                    ))
                } else {
                    Err(bad_message(&msg))
                }
            }
            _ => Err(bad_message(&msg)),
        }
    }

    fn write_request(
        &self,
        conn: &Connection,
        req: Self::Request,
    ) -> Result<(Message<ObjectId>, Option<(&'static Interface, u32)>), InvalidId> {
        conn.object_info(self.id())?;
        match req {
            Request::Release => Ok((message!(self.id.clone(), REQ_RELEASE_OPCODE, []), None)),
        }
    }
}

impl RelativePointer {
    /// Release the relative pointer
    ///
    /// Motion events in flight are discarded once this is sent.
    pub fn release(&self, conn: &Connection) {
        let _ = conn.send_request(self, Request::Release, None);
    }
}
