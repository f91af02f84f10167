//! Lock or confine the pointer to a surface
//!
//! The pointer lock manager is a global bound from the registry by the surrounding runtime, and
//! adopted into the [`Connection`]. It creates [`LockedPointer`] and [`ConfinedPointer`] sessions
//! for a given surface and seat.
//!
//! A locked pointer stays in place: while the lock is in effect, only relative motion events are
//! meaningful. A confined pointer keeps moving, but never leaves the confinement region, which is
//! the intersection of the surface input region with the optional region given at creation.

use std::sync::Arc;

use super::{
    confined_pointer::ConfinedPointer, interfaces::POINTER_LOCK_INTERFACE,
    locked_pointer::LockedPointer, wl_region::WlRegion, wl_seat::WlSeat, wl_surface::WlSurface,
};
use crate::{
    backend::{
        client::{InvalidId, ObjectData, ObjectId},
        message,
        protocol::{same_interface, Argument, Interface, Message},
    },
    Connection, DispatchError, Proxy,
};

/// Opcode of the `lock_pointer` request
pub const REQ_LOCK_POINTER_OPCODE: u16 = 0;
/// Opcode of the `confine_pointer` request
pub const REQ_CONFINE_POINTER_OPCODE: u16 = 1;
#[doc = r" The minimal object version supporting this request"]
pub const REQ_LOCK_POINTER_SINCE: u32 = 1u32;
#[doc = r" The minimal object version supporting this request"]
pub const REQ_CONFINE_POINTER_SINCE: u32 = 1u32;

/// Requests of the pointer lock manager
#[derive(Debug)]
#[non_exhaustive]
pub enum Request {
    /// lock pointer to a position
    ///
    /// The lock takes effect once the surface has pointer focus, which is announced by the
    /// `locked` event of the new object.
    LockPointer {
        /// surface to lock the pointer to
        surface: WlSurface,
        /// seat whose pointer is locked
        seat: WlSeat,
        /// region of the surface where the lock may activate
        region: Option<WlRegion>,
    },
    /// confine pointer to a region
    ///
    /// The confinement takes effect once the surface has pointer focus, which is announced by the
    /// `confined` event of the new object.
    ConfinePointer {
        /// surface to confine the pointer to
        surface: WlSurface,
        /// seat whose pointer is confined
        seat: WlSeat,
        /// confinement region, the whole input region of the surface if absent
        region: Option<WlRegion>,
    },
}

/// This interface has no event
#[derive(Debug)]
#[non_exhaustive]
pub enum Event {}

proxy_handle!(
    /// The pointer lock manager global
    PointerLockManager
);

impl Proxy for PointerLockManager {
    type Request = Request;
    type Event = Event;
    type State = ();

    #[inline]
    fn interface() -> &'static Interface {
        &POINTER_LOCK_INTERFACE
    }

    proxy_accessors!(PointerLockManager);

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
        let my_info = conn.object_info(self.id())?;
        let (opcode, surface, seat, region, child) = match req {
            Request::LockPointer { surface, seat, region } => {
                (REQ_LOCK_POINTER_OPCODE, surface, seat, region, LockedPointer::interface())
            }
            Request::ConfinePointer { surface, seat, region } => {
                (REQ_CONFINE_POINTER_OPCODE, surface, seat, region, ConfinedPointer::interface())
            }
        };
        Ok((
            message!(
                self.id.clone(),
                opcode,
                [
                    Argument::NewId(ObjectId::null()),
                    Argument::Object(Proxy::id(&surface)),
                    Argument::Object(Proxy::id(&seat)),
                    Argument::Object(region.map(|r| Proxy::id(&r)).unwrap_or_else(ObjectId::null)),
                ],
            ),
            Some((child, my_info.version)),
        ))
    }
}

impl PointerLockManager {
    /// Lock the pointer of `seat` in place while `surface` has focus
    ///
    /// The returned session starts in the
    /// [`Requested`](crate::session::SessionState::Requested) state. Returns an error if the
    /// manager or any of the arguments is no longer alive; nothing is sent in that case.
    pub fn lock_pointer<U: Send + Sync + 'static>(
        &self,
        conn: &Connection,
        surface: &WlSurface,
        seat: &WlSeat,
        region: Option<&WlRegion>,
        udata: U,
    ) -> Result<LockedPointer, InvalidId> {
        let ret = conn.send_request(
            self,
            Request::LockPointer {
                surface: surface.clone(),
                seat: seat.clone(),
                region: region.cloned(),
            },
            Some(conn.make_data::<LockedPointer, U>(udata)),
        )?;
        Proxy::from_id(conn, ret)
    }

    /// Confine the pointer of `seat` to a region of `surface` while it has focus
    ///
    /// Same as [`lock_pointer()`](Self::lock_pointer), for a confinement session.
    pub fn confine_pointer<U: Send + Sync + 'static>(
        &self,
        conn: &Connection,
        surface: &WlSurface,
        seat: &WlSeat,
        region: Option<&WlRegion>,
        udata: U,
    ) -> Result<ConfinedPointer, InvalidId> {
        let ret = conn.send_request(
            self,
            Request::ConfinePointer {
                surface: surface.clone(),
                seat: seat.clone(),
                region: region.cloned(),
            },
            Some(conn.make_data::<ConfinedPointer, U>(udata)),
        )?;
        Proxy::from_id(conn, ret)
    }

    /// Destroy the manager
    ///
    /// The interface has no destructor request: the manager is only dropped from the connection,
    /// and the server is not notified. Sessions it created are not affected.
    pub fn destroy(&self, conn: &Connection) {
        let _ = conn.forget(self);
    }
}
