//! Protocol objects of the pointer extensions
//!
//! Each interface has its own module, holding the handle type, its `Request` and `Event` enums,
//! and constants for the opcodes and minimal versions of its messages. The descriptors of the
//! interfaces live in [`interfaces`].

// Struct and common trait items shared by every handle type
macro_rules! proxy_handle {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone)]
        pub struct $name {
            id: ObjectId,
            version: u32,
            data: Option<Arc<dyn ObjectData>>,
        }

        impl std::cmp::PartialEq for $name {
            fn eq(&self, other: &$name) -> bool {
                self.id == other.id
            }
        }

        impl std::cmp::Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&self.id, state)
            }
        }
    };
}

macro_rules! proxy_accessors {
    ($name:ident) => {
        #[inline]
        fn id(&self) -> ObjectId {
            self.id.clone()
        }

        #[inline]
        fn version(&self) -> u32 {
            self.version
        }

        #[inline]
        fn object_data(&self) -> Option<&Arc<dyn ObjectData>> {
            self.data.as_ref()
        }

        fn from_id(conn: &Connection, id: ObjectId) -> Result<Self, InvalidId> {
            if !same_interface(id.interface(), Self::interface()) && !id.is_null() {
                return Err(InvalidId);
            }
            let version = conn.object_info(id.clone()).map(|info| info.version).unwrap_or(0);
            let data = conn.get_object_data(id.clone()).ok();
            Ok($name { id, version, data })
        }
    };
}

pub mod interfaces;

mod foreign;
pub use foreign::{wl_pointer, wl_region, wl_seat, wl_surface};

pub mod confined_pointer;
pub mod locked_pointer;
pub mod pointer_lock;
pub mod relative_pointer;
pub mod relative_pointer_manager;
