//! Wayland objects map

use crate::protocol::Interface;

/// Limit separating server-created from client-created objects IDs in the namespace
///
/// The pointer extensions never let the server create objects, so any id at or above
/// this limit is unknown to a client.
pub const SERVER_ID_LIMIT: u32 = 0xFF00_0000;

/// The representation of a protocol object
#[derive(Debug, Clone)]
pub struct Object<Data> {
    /// Interface name of this object
    pub interface: &'static Interface,
    /// Version of this object
    pub version: u32,
    /// Data associated to this object (its lifecycle flags and handler)
    pub data: Data,
}

/// A holder for the object store of a connection
///
/// Keeps track of which object id is associated to which
/// interface object, and which is currently unused.
#[derive(Debug, Default)]
pub struct ObjectMap<Data> {
    client_objects: Vec<Option<Object<Data>>>,
}

impl<Data: Clone> ObjectMap<Data> {
    /// Create a new empty object map
    pub fn new() -> Self {
        Self { client_objects: Vec::new() }
    }

    /// Find an object in the store
    pub fn find(&self, id: u32) -> Option<Object<Data>> {
        if id == 0 || id >= SERVER_ID_LIMIT {
            None
        } else {
            self.client_objects.get((id - 1) as usize).and_then(Clone::clone)
        }
    }

    /// Remove an object from the store
    ///
    /// Does nothing if the object didn't previously exists
    pub fn remove(&mut self, id: u32) {
        if id == 0 || id >= SERVER_ID_LIMIT {
            return;
        }
        if let Some(place) = self.client_objects.get_mut((id - 1) as usize) {
            *place = None;
        }
    }

    /// Allocate a new id for an object in the client namespace
    ///
    /// The lowest free id is reused first, as libwayland does.
    pub fn client_insert_new(&mut self, object: Object<Data>) -> u32 {
        let index = match self.client_objects.iter().position(Option::is_none) {
            Some(index) => {
                self.client_objects[index] = Some(object);
                index
            }
            None => {
                self.client_objects.push(Some(object));
                self.client_objects.len() - 1
            }
        };
        index as u32 + 1
    }

    /// Mutably access an object of the map
    pub fn with<T, F: FnOnce(&mut Object<Data>) -> T>(&mut self, id: u32, f: F) -> Result<T, ()> {
        if id == 0 || id >= SERVER_ID_LIMIT {
            return Err(());
        }
        match self.client_objects.get_mut((id - 1) as usize) {
            Some(Some(obj)) => Ok(f(obj)),
            _ => Err(()),
        }
    }
}
