// Core objects passed as arguments to the extension requests
//
// They are created by the core protocol and adopted into the connection; no request of theirs is
// sent, and no event of theirs is parsed, through this crate.

macro_rules! foreign_proxy {
    ($module:ident, $name:ident, $iface:ident, $doc:literal) => {
        #[doc = $doc]
        pub mod $module {
            use std::sync::Arc;

            use crate::{
                backend::{
                    client::{InvalidId, ObjectData, ObjectId},
                    core_interfaces::$iface,
                    protocol::{same_interface, Interface, Message},
                },
                Connection, DispatchError, Proxy,
            };

            /// Requests of this interface are not handled by this crate
            #[derive(Debug)]
            pub enum Request {}

            /// Events of this interface are not handled by this crate
            #[derive(Debug)]
            pub enum Event {}

            proxy_handle!(
                #[doc = $doc]
                $name
            );

            impl Proxy for $name {
                type Request = Request;
                type Event = Event;
                type State = ();

                #[inline]
                fn interface() -> &'static Interface {
                    &$iface
                }

                proxy_accessors!($name);

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
                    _conn: &Connection,
                    req: Self::Request,
                ) -> Result<(Message<ObjectId>, Option<(&'static Interface, u32)>), InvalidId> {
                    match req {}
                }
            }
        }
    };
}

foreign_proxy!(wl_surface, WlSurface, WL_SURFACE_INTERFACE, "A `wl_surface` of the core protocol");
foreign_proxy!(wl_seat, WlSeat, WL_SEAT_INTERFACE, "A `wl_seat` of the core protocol");
foreign_proxy!(wl_region, WlRegion, WL_REGION_INTERFACE, "A `wl_region` of the core protocol");
foreign_proxy!(wl_pointer, WlPointer, WL_POINTER_INTERFACE, "A `wl_pointer` of the core protocol");
