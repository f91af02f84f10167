use std::{
    any::Any,
    fmt,
    marker::PhantomData,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use wayland_pointer_backend::{
    client::{Backend, ObjectData, ObjectId},
    protocol::{Message, ProtocolError},
};

use crate::{Connection, DispatchError, Proxy};

type Handler<I> = Box<dyn FnMut(&Connection, &I, <I as Proxy>::Event) + Send>;

/// The [`ObjectData`] implementation used by the protocol objects of this crate
///
/// It holds the user data given at object creation, the lifecycle state of the object and its
/// event handler.
pub struct ProxyData<I: Proxy> {
    /// The user-data associated with this object
    pub udata: Box<dyn Any + Send + Sync>,
    state: Mutex<I::State>,
    handler: Mutex<Option<Handler<I>>>,
    destroyed: AtomicBool,
    _phantom: PhantomData<fn(&I)>,
}

impl<I: Proxy> ProxyData<I> {
    pub(crate) fn new<U: Send + Sync + 'static>(udata: U) -> Self {
        Self {
            udata: Box::new(udata),
            state: Mutex::new(I::State::default()),
            handler: Mutex::new(None),
            destroyed: AtomicBool::new(false),
            _phantom: PhantomData,
        }
    }

    /// A snapshot of the object state
    pub fn state(&self) -> I::State {
        self.state.lock().unwrap().clone()
    }

    pub(crate) fn assign(&self, handler: Handler<I>) {
        *self.handler.lock().unwrap() = Some(handler);
    }
}

impl<I: Proxy> ObjectData for ProxyData<I> {
    fn event(
        self: Arc<Self>,
        backend: &Backend,
        msg: Message<ObjectId>,
    ) -> Result<(), ProtocolError> {
        let conn = Connection::from_backend(backend.clone());
        let (proxy, event) = I::parse_event(&conn, msg)?;

        I::apply_event(&mut self.state.lock().unwrap(), &event)
            .map_err(|error| DispatchError::InvalidTransition { sender_id: proxy.id(), error })?;

        // The handler is taken out while it runs, so that it may re-assign itself or send requests
        let handler = self.handler.lock().unwrap().take();
        match handler {
            Some(mut handler) => {
                handler(&conn, &proxy, event);
                let mut slot = self.handler.lock().unwrap();
                if slot.is_none() && !self.destroyed.load(Ordering::Acquire) {
                    *slot = Some(handler);
                }
            }
            #[cfg(feature = "log")]
            None => crate::log_debug!("No handler assigned to {}, ignoring {:?}", proxy.id(), event),
            #[cfg(not(feature = "log"))]
            None => {}
        }
        Ok(())
    }

    fn destroyed(&self, _object_id: ObjectId) {
        self.destroyed.store(true, Ordering::Release);
        I::apply_destroyed(&mut self.state.lock().unwrap());
        // drop the handler and everything it captured
        self.handler.lock().unwrap().take();
    }

    #[cfg_attr(unstable_coverage, coverage(off))]
    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<I: Proxy> fmt::Debug for ProxyData<I> {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyData")
            .field("interface", &I::interface().name)
            .field("state", &*self.state.lock().unwrap())
            .field("has_handler", &self.handler.lock().unwrap().is_some())
            .finish_non_exhaustive()
    }
}
