//! Client-side object bookkeeping on top of an external transport

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use smallvec::SmallVec;

use crate::{
    debug::{self, Direction, DisplaySlice, Trace},
    map::{Object, ObjectMap},
    protocol::{
        check_for_signature, same_interface, same_interface_or_anonymous, AllowNull, Argument,
        ArgumentType, Interface, Message, ObjectInfo, ProtocolError, ANONYMOUS_INTERFACE,
        INLINE_ARGS,
    },
};

pub use crate::types::{InvalidId, WaylandError};

/// Error code used for events sent to an unknown object
pub const INVALID_OBJECT: u32 = 0;
/// Error code used for malformed events: unknown opcode, bad signature, invalid state transition
pub const INVALID_METHOD: u32 = 1;

/// The external object-proxy runtime carrying messages to the server
///
/// The backend hands it every outgoing request, with all object ids already resolved to their
/// protocol ids. Framing, file descriptor passing and socket I/O are the transport's business.
/// Incoming events travel the other way: the transport's dispatch loop feeds them to
/// [`Backend::dispatch_message()`].
///
/// `send_request` is called while the connection state is locked: it must not call back into the
/// [`Backend`] (for example by dispatching events synchronously), or it will deadlock.
pub trait Transport: Send {
    /// Queue a request for the server
    fn send_request(&mut self, msg: Message<u32>) -> std::io::Result<()>;
}

/// A trait representing your data associated to an object
///
/// You will only be given access to it as a `&` reference, so you
/// need to handle interior mutability by yourself.
pub trait ObjectData: downcast_rs::DowncastSync {
    /// Dispatch an event for the associated object
    ///
    /// Returning an error marks the connection as dead: the error is stored and reported
    /// by every later operation.
    fn event(self: Arc<Self>, backend: &Backend, msg: Message<ObjectId>)
        -> Result<(), ProtocolError>;
    /// Notification that the object has been destroyed and is no longer active
    fn destroyed(&self, object_id: ObjectId);
    /// Helper for forwarding a Debug implementation of your `ObjectData` type
    ///
    /// By default will just print `ObjectData { ... }`
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn debug(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectData").finish_non_exhaustive()
    }
}

impl std::fmt::Debug for dyn ObjectData {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.debug(f)
    }
}

downcast_rs::impl_downcast!(sync ObjectData);

/// An ID representing a Wayland object
///
/// Protocol ids are reused once the server acknowledges a destruction, so the id also carries
/// a serial making every incarnation of an id distinct.
#[derive(Clone)]
pub struct ObjectId {
    serial: u32,
    id: u32,
    interface: &'static Interface,
}

impl std::cmp::PartialEq for ObjectId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.serial == other.serial
            && same_interface(self.interface, other.interface)
    }
}

impl std::cmp::Eq for ObjectId {}

impl std::hash::Hash for ObjectId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.serial.hash(state);
        self.id.hash(state);
    }
}

impl fmt::Display for ObjectId {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.interface.name, self.id)
    }
}

impl fmt::Debug for ObjectId {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({}, {})", self, self.serial)
    }
}

impl ObjectId {
    /// Create a null object ID
    ///
    /// This object ID is always invalid, and is used as placeholder for the `new_id` argument of
    /// requests creating objects, and for absent nullable object arguments.
    pub fn null() -> ObjectId {
        ObjectId { serial: 0, id: 0, interface: &ANONYMOUS_INTERFACE }
    }

    /// Check if this is the null ID
    #[inline]
    pub fn is_null(&self) -> bool {
        self.id == 0
    }

    /// Interface of the represented object
    #[inline]
    pub fn interface(&self) -> &'static Interface {
        self.interface
    }

    /// Return the protocol-level numerical ID of this object
    ///
    /// Protocol IDs are reused after object destruction, so this should not be used as a
    /// unique identifier.
    #[inline]
    pub fn protocol_id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone)]
struct Data {
    client_destroyed: bool,
    server_destroyed: bool,
    user_data: Arc<dyn ObjectData>,
    serial: u32,
}

struct ProtocolState {
    transport: Box<dyn Transport>,
    map: ObjectMap<Data>,
    last_error: Option<WaylandError>,
    last_serial: u32,
    debug: bool,
}

impl fmt::Debug for ProtocolState {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolState")
            .field("map", &self.map)
            .field("last_error", &self.last_error)
            .field("last_serial", &self.last_serial)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// The object table of a client connection
///
/// This type tracks every object known to the connection, validates outgoing requests against
/// the protocol description before handing them to the [`Transport`], and routes incoming events
/// to the [`ObjectData`] of their target. Cloning it gives another handle to the same connection.
#[derive(Clone, Debug)]
pub struct Backend {
    state: Arc<Mutex<ProtocolState>>,
}

impl PartialEq for Backend {
    fn eq(&self, rhs: &Self) -> bool {
        Arc::ptr_eq(&self.state, &rhs.state)
    }
}

impl Eq for Backend {}

impl Backend {
    /// Create a backend sending its requests through the provided transport
    ///
    /// Message tracing to stderr is enabled when `WAYLAND_DEBUG` is `1` or `client`.
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(ProtocolState {
                transport: Box::new(transport),
                map: ObjectMap::new(),
                last_error: None,
                last_serial: 0,
                debug: debug::has_debug_client_env(),
            })),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ProtocolState> {
        self.state.lock().unwrap()
    }

    /// Get the last error that occurred on this backend
    ///
    /// If this returns an error, the connection is already dead.
    pub fn last_error(&self) -> Option<WaylandError> {
        self.lock_state().last_error.clone()
    }

    /// Register an object created by the surrounding runtime
    ///
    /// Globals bound through the registry and core objects such as `wl_surface` or `wl_seat` are
    /// created outside of this crate. Adopting them allocates their id in this connection's
    /// namespace so they can be used as request targets and arguments.
    ///
    /// **Panic:** if `version` is 0 or above the version supported by `interface`.
    pub fn adopt(
        &self,
        interface: &'static Interface,
        version: u32,
        data: Arc<dyn ObjectData>,
    ) -> ObjectId {
        if version == 0 || version > interface.version {
            panic!(
                "Cannot adopt {} at version {}: supported versions are 1 to {}.",
                interface.name, version, interface.version
            );
        }
        let mut guard = self.lock_state();
        let serial = guard.next_serial();
        let id = guard.map.client_insert_new(Object {
            interface,
            version,
            data: Data {
                client_destroyed: false,
                server_destroyed: false,
                user_data: data,
                serial,
            },
        });
        #[cfg(feature = "log")]
        crate::log_debug!("Adopted {}@{} (version {})", interface.name, id, version);
        ObjectId { serial, id, interface }
    }

    /// Get the detailed information about a wayland object
    ///
    /// Returns an error if the provided object ID is no longer valid, or if the connection is dead.
    pub fn info(&self, id: ObjectId) -> Result<ObjectInfo, InvalidId> {
        let guard = self.lock_state();
        if guard.last_error.is_some() {
            return Err(InvalidId);
        }
        let object = guard.get_object(&id)?;
        if object.data.client_destroyed {
            Err(InvalidId)
        } else {
            Ok(ObjectInfo { id: id.id, interface: object.interface, version: object.version })
        }
    }

    /// Sends a request to the server
    ///
    /// Returns the id of the created object if the request creates one, the null id otherwise.
    ///
    /// Returns an error, without sending anything, if the sender or any object argument is no
    /// longer valid, or if the connection is dead.
    ///
    /// **Panic:**
    ///
    /// Several checks against the protocol description are done, and this method will panic if they do
    /// not pass:
    ///
    /// - the message opcode must be valid for the sender interface
    /// - the request must be available at the version of the sender
    /// - the argument list must match the prototype for the message associated with this opcode
    /// - object arguments must have the interface the message expects, and may be null only
    ///   where the message allows it
    /// - if the method creates a new object, a null placeholder must be given in the argument
    ///   list, together with an object data for the child
    pub fn send_request(
        &self,
        Message { sender_id: id, opcode, args }: Message<ObjectId>,
        data: Option<Arc<dyn ObjectData>>,
        child_spec: Option<(&'static Interface, u32)>,
    ) -> Result<ObjectId, InvalidId> {
        let mut guard = self.lock_state();
        if guard.last_error.is_some() {
            return Err(InvalidId);
        }
        let object = guard.get_object(&id)?;

        let message_desc = match object.interface.requests.get(opcode as usize) {
            Some(msg) => msg,
            None => {
                panic!("Unknown opcode {} for object {}@{}.", opcode, object.interface.name, id.id);
            }
        };

        if object.data.client_destroyed {
            if guard.debug {
                debug::print(Trace {
                    direction: Direction::Request,
                    interface: id.interface.name,
                    id: id.id,
                    message: message_desc.name,
                    args: &args,
                    discarded: true,
                });
            }
            return Err(InvalidId);
        }

        if message_desc.since > object.version {
            panic!(
                "Cannot send request {}@{}.{} which requires version >= {} on an object of version {}.",
                object.interface.name, id.id, message_desc.name, message_desc.since, object.version
            );
        }

        if !check_for_signature(message_desc.signature, &args) {
            panic!(
                "Unexpected signature for request {}@{}.{}: expected {:?}, got {:?}.",
                object.interface.name, id.id, message_desc.name, message_desc.signature, args
            );
        }

        // Resolve object arguments before touching the map, so that a dead argument
        // leaves no trace of the request
        let mut arg_interfaces = message_desc.arg_interfaces.iter();
        for (i, arg) in args.iter().enumerate() {
            if let Argument::Object(o) = arg {
                let next_interface = arg_interfaces.next().copied().unwrap_or(&ANONYMOUS_INTERFACE);
                if !o.is_null() {
                    let arg_object = guard.get_object(o)?;
                    if arg_object.data.client_destroyed {
                        return Err(InvalidId);
                    }
                    if !same_interface_or_anonymous(next_interface, arg_object.interface) {
                        panic!(
                            "Request {}@{}.{} expects an argument of interface {} but {} was provided instead.",
                            object.interface.name, id.id, message_desc.name, next_interface.name, arg_object.interface.name
                        );
                    }
                } else if !matches!(message_desc.signature[i], ArgumentType::Object(AllowNull::Yes)) {
                    panic!(
                        "Request {}@{}.{} expects an non-null object argument.",
                        object.interface.name, id.id, message_desc.name
                    );
                }
            }
        }

        // Prepare the child object
        let child_spec = if message_desc.signature.iter().any(|arg| matches!(arg, ArgumentType::NewId))
        {
            match (child_spec, message_desc.child_interface) {
                (Some((iface, version)), Some(child_interface)) => {
                    if !same_interface(child_interface, iface) {
                        panic!(
                            "Error when sending request {}@{}.{}: expected interface {} but got {}",
                            object.interface.name, id.id, message_desc.name, child_interface.name, iface.name
                        );
                    }
                    if version != object.version {
                        panic!(
                            "Error when sending request {}@{}.{}: expected version {} but got {}",
                            object.interface.name, id.id, message_desc.name, object.version, version
                        );
                    }
                    Some((iface, version))
                }
                (None, Some(child_interface)) => Some((child_interface, object.version)),
                (_, None) => panic!(
                    "Error when sending request {}@{}.{}: target interface must be specified for a generic constructor.",
                    object.interface.name, id.id, message_desc.name
                ),
            }
        } else {
            None
        };

        let child = if let Some((child_interface, child_version)) = child_spec {
            let user_data = match data {
                Some(data) => data,
                None => panic!(
                    "Sending request {}@{}.{} creating an object without providing an object data.",
                    object.interface.name, id.id, message_desc.name
                ),
            };
            let child_serial = guard.next_serial();
            let child_id = guard.map.client_insert_new(Object {
                interface: child_interface,
                version: child_version,
                data: Data {
                    client_destroyed: false,
                    server_destroyed: false,
                    user_data,
                    serial: child_serial,
                },
            });
            Some(ObjectId { id: child_id, serial: child_serial, interface: child_interface })
        } else {
            None
        };

        // Substitute the placeholder with the freshly allocated id
        let args = args
            .into_iter()
            .map(|arg| match arg {
                Argument::NewId(p) => {
                    if !p.is_null() {
                        panic!(
                            "The newid provided when sending request {}@{}.{} is not a placeholder.",
                            object.interface.name, id.id, message_desc.name
                        );
                    }
                    match child {
                        Some(ref child) => Argument::NewId(child.clone()),
                        None => unreachable!(),
                    }
                }
                arg => arg,
            })
            .collect::<SmallVec<[_; INLINE_ARGS]>>();

        if guard.debug {
            debug::print(Trace {
                direction: Direction::Request,
                interface: object.interface.name,
                id: id.id,
                message: message_desc.name,
                args: &args,
                discarded: false,
            });
        }
        #[cfg(feature = "log")]
        crate::log_debug!("Sending {}.{} ({})", id, message_desc.name, DisplaySlice(&args));

        let msg = Message {
            sender_id: id.id,
            opcode,
            args: args.into_iter().map(|arg| arg.map_id(|o| o.id)).collect(),
        };

        if let Err(err) = guard.transport.send_request(msg) {
            guard.store_and_return_error(err);
        }

        if message_desc.is_destructor {
            guard.mark_client_destroyed(id.id);
            // the lock must not be held while user code runs
            std::mem::drop(guard);
            object.data.user_data.destroyed(id);
        }

        Ok(child.unwrap_or_else(ObjectId::null))
    }

    /// Drop an object locally, without sending any request
    ///
    /// This is what destroying an object whose interface has no destructor request amounts to:
    /// the server is not told, and the id stays reserved until the connection ends.
    pub fn forget(&self, id: ObjectId) -> Result<(), InvalidId> {
        let mut guard = self.lock_state();
        let object = guard.get_object(&id)?;
        if object.data.client_destroyed {
            return Err(InvalidId);
        }
        guard.map.with(id.id, |obj| obj.data.client_destroyed = true).map_err(|()| InvalidId)?;
        #[cfg(feature = "log")]
        crate::log_debug!("Forgot {}", id);
        std::mem::drop(guard);
        object.data.user_data.destroyed(id);
        Ok(())
    }

    /// Access the object data associated with a given object ID
    pub fn get_data(&self, id: ObjectId) -> Result<Arc<dyn ObjectData>, InvalidId> {
        let object = self.lock_state().get_object(&id)?;
        Ok(object.data.user_data)
    }

    /// Set the object data associated with a given object ID
    pub fn set_data(&self, id: ObjectId, data: Arc<dyn ObjectData>) -> Result<(), InvalidId> {
        self.lock_state()
            .map
            .with(id.id, move |objdata| {
                if objdata.data.serial != id.serial {
                    Err(InvalidId)
                } else {
                    objdata.data.user_data = data;
                    Ok(())
                }
            })
            .unwrap_or(Err(InvalidId))
    }

    /// Acknowledge the server-side deletion of an object id (`wl_display.delete_id`)
    ///
    /// Once both sides are done with an id, it is freed and may be handed out again.
    pub fn delete_id(&self, id: u32) -> Result<(), WaylandError> {
        let mut guard = self.lock_state();
        guard.no_last_error()?;
        let client_destroyed = match guard.map.with(id, |obj| {
            obj.data.server_destroyed = true;
            obj.data.client_destroyed
        }) {
            Ok(client_destroyed) => client_destroyed,
            Err(()) => {
                let err = ProtocolError {
                    code: INVALID_OBJECT,
                    object_id: id,
                    object_interface: "<unknown>".into(),
                    message: format!("Server deleted unknown object id {id}."),
                };
                return Err(guard.store_and_return_error(err));
            }
        };
        if client_destroyed {
            guard.map.remove(id);
        }
        Ok(())
    }

    /// Dispatch one event received by the transport
    ///
    /// The event is validated against the interface of its target, and its arguments resolved,
    /// before the target's [`ObjectData`] is invoked. Events to objects the client already
    /// destroyed are discarded: the server may have sent them before seeing the destructor.
    ///
    /// Any violation of the protocol is fatal: the error is stored and returned by this and all
    /// later calls.
    pub fn dispatch_message(&self, message: Message<u32>) -> Result<(), WaylandError> {
        let mut guard = self.lock_state();
        guard.no_last_error()?;

        let receiver = match guard.map.find(message.sender_id) {
            Some(receiver) => receiver,
            None => {
                let err = ProtocolError {
                    code: INVALID_OBJECT,
                    object_id: message.sender_id,
                    object_interface: "<unknown>".into(),
                    message: format!("Event {} sent to unknown object.", message.opcode),
                };
                return Err(guard.store_and_return_error(err));
            }
        };

        let message_desc = match receiver.interface.events.get(message.opcode as usize) {
            Some(desc) => desc,
            None => {
                let err = ProtocolError {
                    code: INVALID_METHOD,
                    object_id: message.sender_id,
                    object_interface: receiver.interface.name.into(),
                    message: format!("Unknown event opcode {}.", message.opcode),
                };
                return Err(guard.store_and_return_error(err));
            }
        };

        if !check_for_signature(message_desc.signature, &message.args) {
            let err = ProtocolError {
                code: INVALID_METHOD,
                object_id: message.sender_id,
                object_interface: receiver.interface.name.into(),
                message: format!(
                    "Malformed event {}: expected signature \"{}\".",
                    message_desc.name,
                    message_desc.signature_string()
                ),
            };
            return Err(guard.store_and_return_error(err));
        }

        // Convert the arguments
        let mut args = SmallVec::with_capacity(message.args.len());
        let mut arg_interfaces = message_desc.arg_interfaces.iter();
        for arg in message.args.into_iter() {
            args.push(match arg {
                Argument::Int(i) => Argument::Int(i),
                Argument::Uint(u) => Argument::Uint(u),
                Argument::Fixed(f) => Argument::Fixed(f),
                Argument::Object(0) => Argument::Object(ObjectId::null()),
                Argument::Object(o) => {
                    let next_interface = arg_interfaces.next().copied().unwrap_or(&ANONYMOUS_INTERFACE);
                    let obj = match guard.map.find(o) {
                        Some(obj) if same_interface_or_anonymous(next_interface, obj.interface) => obj,
                        _ => {
                            let err = ProtocolError {
                                code: INVALID_OBJECT,
                                object_id: message.sender_id,
                                object_interface: receiver.interface.name.into(),
                                message: format!(
                                    "Event {} references object {} which is not a live {}.",
                                    message_desc.name, o, next_interface.name
                                ),
                            };
                            return Err(guard.store_and_return_error(err));
                        }
                    };
                    Argument::Object(ObjectId { id: o, serial: obj.data.serial, interface: obj.interface })
                }
                Argument::NewId(new_id) => {
                    let err = ProtocolError {
                        code: INVALID_METHOD,
                        object_id: message.sender_id,
                        object_interface: receiver.interface.name.into(),
                        message: format!(
                            "Event {} tries to create object {}, server-created objects are not supported.",
                            message_desc.name, new_id
                        ),
                    };
                    return Err(guard.store_and_return_error(err));
                }
            });
        }

        if guard.debug {
            debug::print(Trace {
                direction: Direction::Event,
                interface: receiver.interface.name,
                id: message.sender_id,
                message: message_desc.name,
                args: &args,
                discarded: receiver.data.client_destroyed,
            });
        }

        // If this event is send to an already destroyed object (by the client), swallow it
        if receiver.data.client_destroyed {
            #[cfg(feature = "log")]
            crate::log_debug!(
                "Discarding {}@{}.{} sent to a destroyed object",
                receiver.interface.name,
                message.sender_id,
                message_desc.name
            );
            return Ok(());
        }

        let id = ObjectId {
            id: message.sender_id,
            serial: receiver.data.serial,
            interface: receiver.interface,
        };

        // unlock the mutex while we invoke the user callback
        std::mem::drop(guard);
        #[cfg(feature = "log")]
        crate::log_debug!("Dispatching {}.{} ({})", id, message_desc.name, DisplaySlice(&args));
        let ret = receiver.data.user_data.clone().event(
            self,
            Message { sender_id: id.clone(), opcode: message.opcode, args },
        );
        let mut guard = self.lock_state();

        if let Err(err) = ret {
            return Err(guard.store_and_return_error(err));
        }

        if message_desc.is_destructor {
            guard.mark_client_destroyed(message.sender_id);
            std::mem::drop(guard);
            receiver.data.user_data.destroyed(id);
        }

        Ok(())
    }
}

impl ProtocolState {
    fn next_serial(&mut self) -> u32 {
        self.last_serial = self.last_serial.wrapping_add(1);
        self.last_serial
    }

    #[inline]
    fn no_last_error(&self) -> Result<(), WaylandError> {
        if let Some(ref err) = self.last_error {
            Err(err.clone())
        } else {
            Ok(())
        }
    }

    #[inline]
    fn store_and_return_error(&mut self, err: impl Into<WaylandError>) -> WaylandError {
        let err = err.into();
        crate::log_error!("{err}");
        self.last_error = Some(err.clone());
        err
    }

    fn get_object(&self, id: &ObjectId) -> Result<Object<Data>, InvalidId> {
        let object = self.map.find(id.id).ok_or(InvalidId)?;
        if object.data.serial != id.serial {
            return Err(InvalidId);
        }
        Ok(object)
    }

    // the id is freed right away if the server already released it
    fn mark_client_destroyed(&mut self, id: u32) {
        let server_destroyed = self
            .map
            .with(id, |obj| {
                obj.data.client_destroyed = true;
                obj.data.server_destroyed
            })
            .unwrap_or(false);
        if server_destroyed {
            self.map.remove(id);
        }
    }
}
