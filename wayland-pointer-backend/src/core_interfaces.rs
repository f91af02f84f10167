//! Core interfaces referenced by the pointer extensions
//!
//! The extensions take `wl_surface`, `wl_seat`, `wl_region` and `wl_pointer` objects as request
//! arguments. Those objects are created and driven by the core protocol, outside of this crate,
//! so their descriptors only carry a name and version: no message of theirs is ever sent or parsed
//! here.

use crate::protocol::Interface;

/// Interface `wl_surface`
pub static WL_SURFACE_INTERFACE: Interface =
    Interface { name: "wl_surface", version: 6, requests: &[], events: &[] };

/// Interface `wl_seat`
pub static WL_SEAT_INTERFACE: Interface =
    Interface { name: "wl_seat", version: 9, requests: &[], events: &[] };

/// Interface `wl_region`
pub static WL_REGION_INTERFACE: Interface =
    Interface { name: "wl_region", version: 1, requests: &[], events: &[] };

/// Interface `wl_pointer`
pub static WL_POINTER_INTERFACE: Interface =
    Interface { name: "wl_pointer", version: 9, requests: &[], events: &[] };
