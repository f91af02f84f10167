// This module contains helpers functions and types that
// are not test in themselves, but are used by several tests.

#![allow(dead_code)]

pub extern crate wayland_pointer_backend as backend;
pub extern crate wayland_pointer_client as wayc;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use backend::{
    client::{Transport, WaylandError},
    protocol::{Argument, Message, ProtocolError},
};
use wayc::{
    protocol::{
        pointer_lock::PointerLockManager, relative_pointer_manager::RelativePointerManager,
        wl_pointer::WlPointer, wl_region::WlRegion, wl_seat::WlSeat, wl_surface::WlSurface,
    },
    Connection, Proxy,
};

/// A transport recording every request instead of writing it to a socket
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    sent: Arc<Mutex<Vec<Message<u32>>>>,
    broken: Arc<AtomicBool>,
}

impl Transport for ScriptedTransport {
    fn send_request(&mut self, msg: Message<u32>) -> std::io::Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(std::io::ErrorKind::BrokenPipe.into());
        }
        self.sent.lock().unwrap().push(msg);
        Ok(())
    }
}

impl ScriptedTransport {
    /// Take the requests sent since the last call
    pub fn take(&self) -> Vec<Message<u32>> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    /// Make every later write fail, as if the server had hung up
    pub fn break_pipe(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }
}

/// A connection with the extension globals and the core objects they need already adopted
///
/// Ids are handed out in adoption order: the pointer lock manager is 1, the relative pointer
/// manager 2, then the surface 3, the seat 4, the region 5 and the pointer 6. The first object
/// created by a test gets id 7.
pub struct TestClient {
    pub conn: Connection,
    pub transport: ScriptedTransport,
    pub pointer_lock: PointerLockManager,
    pub relative_pointer_manager: RelativePointerManager,
    pub surface: WlSurface,
    pub seat: WlSeat,
    pub region: WlRegion,
    pub pointer: WlPointer,
}

pub const FIRST_CHILD_ID: u32 = 7;

impl TestClient {
    pub fn new() -> TestClient {
        let _ = env_logger::builder().is_test(true).try_init();
        let transport = ScriptedTransport::default();
        let conn = Connection::new(transport.clone());
        let pointer_lock = conn.adopt::<PointerLockManager, _>(1, ()).unwrap();
        let relative_pointer_manager = conn.adopt::<RelativePointerManager, _>(1, ()).unwrap();
        let surface = conn.adopt::<WlSurface, _>(4, ()).unwrap();
        let seat = conn.adopt::<WlSeat, _>(7, ()).unwrap();
        let region = conn.adopt::<WlRegion, _>(1, ()).unwrap();
        let pointer = conn.adopt::<WlPointer, _>(7, ()).unwrap();
        TestClient {
            conn,
            transport,
            pointer_lock,
            relative_pointer_manager,
            surface,
            seat,
            region,
            pointer,
        }
    }

    /// Inject an event as if the server had sent it to `target`
    pub fn send_event<I: Proxy>(
        &self,
        target: &I,
        opcode: u16,
        args: Vec<Argument<u32>>,
    ) -> Result<(), WaylandError> {
        self.conn.dispatch(Message {
            sender_id: target.id().protocol_id(),
            opcode,
            args: args.into_iter().collect(),
        })
    }

    /// Inject a `relative_motion` event, each delta given as its (integral, fractional) words
    pub fn send_motion<I: Proxy>(
        &self,
        target: &I,
        time: u32,
        deltas: [(i32, i32); 4],
    ) -> Result<(), WaylandError> {
        let mut args = vec![Argument::Uint(time)];
        for (integral, fractional) in deltas {
            args.push(Argument::Int(integral));
            args.push(Argument::Int(fractional));
        }
        self.send_event(target, 0, args)
    }
}

/// Assign a handler storing every event the object receives
pub fn record_events<I: Proxy>(proxy: &I) -> Arc<Mutex<Vec<I::Event>>>
where
    I::Event: Send,
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    proxy.quick_assign(move |_, _, event| sink.lock().unwrap().push(event));
    events
}

pub fn expect_protocol_error(ret: Result<(), WaylandError>) -> ProtocolError {
    match ret {
        Err(WaylandError::Protocol(err)) => err,
        other => panic!("expected a protocol error, got {:?}", other),
    }
}
