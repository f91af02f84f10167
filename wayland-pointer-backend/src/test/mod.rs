#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use crate::client::{Backend, ObjectData, ObjectId, Transport};
use crate::core_interfaces::{WL_REGION_INTERFACE, WL_SURFACE_INTERFACE};
use crate::protocol::{
    AllowNull, ArgumentType, Interface, Message, MessageDesc, ProtocolError,
};

mod object_args;

/*
 * A small protocol exercising every code path of the backend
 */

static TEST_GLOBAL_INTERFACE: Interface = Interface {
    name: "test_global",
    version: 2,
    requests: &[
        MessageDesc {
            name: "create",
            signature: &[
                ArgumentType::NewId,
                ArgumentType::Object(AllowNull::No),
                ArgumentType::Object(AllowNull::Yes),
            ],
            since: 1,
            is_destructor: false,
            child_interface: Some(&TEST_CHILD_INTERFACE),
            arg_interfaces: &[&WL_SURFACE_INTERFACE, &WL_REGION_INTERFACE],
        },
        MessageDesc {
            name: "newer",
            signature: &[ArgumentType::Uint],
            since: 2,
            is_destructor: false,
            child_interface: None,
            arg_interfaces: &[],
        },
    ],
    events: &[],
};

static TEST_CHILD_INTERFACE: Interface = Interface {
    name: "test_child",
    version: 2,
    requests: &[
        MessageDesc {
            name: "poke",
            signature: &[ArgumentType::Fixed, ArgumentType::Int],
            since: 1,
            is_destructor: false,
            child_interface: None,
            arg_interfaces: &[],
        },
        MessageDesc {
            name: "destroy",
            signature: &[],
            since: 1,
            is_destructor: true,
            child_interface: None,
            arg_interfaces: &[],
        },
    ],
    events: &[
        MessageDesc {
            name: "ping",
            signature: &[ArgumentType::Uint],
            since: 1,
            is_destructor: false,
            child_interface: None,
            arg_interfaces: &[],
        },
        MessageDesc {
            name: "gone",
            signature: &[],
            since: 1,
            is_destructor: true,
            child_interface: None,
            arg_interfaces: &[],
        },
    ],
};

/*
 * A transport recording everything it is asked to send
 */

#[derive(Clone, Default)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<Message<u32>>>>,
}

impl RecordingTransport {
    fn take(&self) -> Vec<Message<u32>> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

impl Transport for RecordingTransport {
    fn send_request(&mut self, msg: Message<u32>) -> std::io::Result<()> {
        self.sent.lock().unwrap().push(msg);
        Ok(())
    }
}

/*
 * Object data keeping track of what it was told
 */

#[derive(Default)]
struct RecordingData {
    events: Mutex<Vec<Message<ObjectId>>>,
    destroyed: Mutex<bool>,
    fail_with: Option<ProtocolError>,
}

impl RecordingData {
    fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    fn was_destroyed(&self) -> bool {
        *self.destroyed.lock().unwrap()
    }
}

impl ObjectData for RecordingData {
    fn event(
        self: Arc<Self>,
        _backend: &Backend,
        msg: Message<ObjectId>,
    ) -> Result<(), ProtocolError> {
        self.events.lock().unwrap().push(msg);
        match self.fail_with {
            Some(ref err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn destroyed(&self, _object_id: ObjectId) {
        *self.destroyed.lock().unwrap() = true;
    }
}

/*
 * A connection with a bound test global, a surface and a region
 */

struct Fixture {
    backend: Backend,
    transport: RecordingTransport,
    global: ObjectId,
    surface: ObjectId,
    region: ObjectId,
}

impl Fixture {
    fn new() -> Fixture {
        let _ = env_logger::builder().is_test(true).try_init();
        let transport = RecordingTransport::default();
        let backend = Backend::new(transport.clone());
        let global = backend.adopt(&TEST_GLOBAL_INTERFACE, 1, Arc::new(RecordingData::default()));
        let surface = backend.adopt(&WL_SURFACE_INTERFACE, 1, Arc::new(RecordingData::default()));
        let region = backend.adopt(&WL_REGION_INTERFACE, 1, Arc::new(RecordingData::default()));
        Fixture { backend, transport, global, surface, region }
    }

    fn create_child(&self, data: Arc<RecordingData>) -> ObjectId {
        self.backend
            .send_request(
                message!(
                    self.global.clone(),
                    0,
                    [
                        crate::protocol::Argument::NewId(ObjectId::null()),
                        crate::protocol::Argument::Object(self.surface.clone()),
                        crate::protocol::Argument::Object(ObjectId::null()),
                    ],
                ),
                Some(data),
                None,
            )
            .unwrap()
    }
}
