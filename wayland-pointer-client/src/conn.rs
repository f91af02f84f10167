use std::sync::Arc;

use wayland_pointer_backend::{
    client::{Backend, InvalidId, ObjectData, ObjectId, Transport, WaylandError},
    protocol::{Message, ObjectInfo, ProtocolError},
};

use crate::{Proxy, ProxyData};

/// The Wayland connection
///
/// This is the handle through which objects are registered, requests are sent and events are
/// dispatched. It does not own the socket: requests leave through the [`Transport`] it was created
/// with, and the runtime reading the socket hands every received event to
/// [`dispatch()`][Self::dispatch()].
///
/// Cloning it gives another handle to the same connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub(crate) backend: Backend,
}

impl Connection {
    /// Create a connection sending its requests through the provided transport
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self { backend: Backend::new(transport) }
    }

    /// Wrap an existing [`Backend`] into a [`Connection`]
    pub fn from_backend(backend: Backend) -> Self {
        Self { backend }
    }

    /// Get the [`Backend`] underlying this [`Connection`]
    pub fn backend(&self) -> Backend {
        self.backend.clone()
    }

    /// Register an object bound by the surrounding runtime
    ///
    /// This is how the extension managers, bound from the registry, and the core objects they take
    /// as arguments enter the connection. The returned handle carries `udata` as its user data.
    ///
    /// Returns an error if the connection is already dead.
    ///
    /// **Panic:** if `version` is 0 or higher than the version supported for `I`.
    pub fn adopt<I: Proxy, U: Send + Sync + 'static>(
        &self,
        version: u32,
        udata: U,
    ) -> Result<I, InvalidId> {
        if self.backend.last_error().is_some() {
            return Err(InvalidId);
        }
        let id = self.backend.adopt(I::interface(), version, self.make_data::<I, U>(udata));
        I::from_id(self, id)
    }

    /// Create the object data for a new object of interface `I`
    ///
    /// This is a low-level interface used by the request methods of the protocol objects.
    pub fn make_data<I: Proxy, U: Send + Sync + 'static>(&self, udata: U) -> Arc<dyn ObjectData> {
        Arc::new(ProxyData::<I>::new(udata))
    }

    /// Retrieve the protocol error that occured on the connection if any
    ///
    /// If this method returns [`Some`], it means your Wayland connection is already dead.
    pub fn protocol_error(&self) -> Option<ProtocolError> {
        self.backend.last_error()?.as_protocol().cloned()
    }

    /// Get the last error of the connection, if it is dead
    pub fn last_error(&self) -> Option<WaylandError> {
        self.backend.last_error()
    }

    /// Send a request associated with the provided object
    ///
    /// This is a low-level interface used by the request methods of the protocol objects.
    pub fn send_request<I: Proxy>(
        &self,
        proxy: &I,
        request: I::Request,
        data: Option<Arc<dyn ObjectData>>,
    ) -> Result<ObjectId, InvalidId> {
        let (msg, child_spec) = proxy.write_request(self, request)?;
        self.backend.send_request(msg, data, child_spec)
    }

    /// Dispatch an event received from the server
    ///
    /// The handler of the target object, if any, is invoked before this method returns. Any protocol
    /// violation kills the connection, and the error is returned by this and every later call.
    pub fn dispatch(&self, msg: Message<u32>) -> Result<(), WaylandError> {
        self.backend.dispatch_message(msg)
    }

    /// Acknowledge the deletion of an object id by the server
    pub fn delete_id(&self, id: u32) -> Result<(), WaylandError> {
        self.backend.delete_id(id)
    }

    /// Drop an object locally, without notifying the server
    ///
    /// Used for objects whose interface has no destructor request, such as the extension managers.
    pub fn forget<I: Proxy>(&self, proxy: &I) -> Result<(), InvalidId> {
        self.backend.forget(proxy.id())
    }

    /// Get the protocol information related to given object ID
    pub fn object_info(&self, id: ObjectId) -> Result<ObjectInfo, InvalidId> {
        self.backend.info(id)
    }

    /// Get the object data for a given object ID
    ///
    /// This is a low-level interface; see [`Proxy::data()`] for a typed access to the user data.
    pub fn get_object_data(&self, id: ObjectId) -> Result<Arc<dyn ObjectData>, InvalidId> {
        self.backend.get_data(id)
    }
}
