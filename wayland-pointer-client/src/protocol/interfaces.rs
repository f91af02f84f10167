//! Descriptors of the extension interfaces

use wayland_pointer_backend::{
    core_interfaces::{
        WL_POINTER_INTERFACE, WL_REGION_INTERFACE, WL_SEAT_INTERFACE, WL_SURFACE_INTERFACE,
    },
    protocol::{AllowNull, ArgumentType, Interface, MessageDesc},
};

/// Interface `_wl_pointer_lock`
pub static POINTER_LOCK_INTERFACE: Interface = Interface {
    name: "_wl_pointer_lock",
    version: 1,
    requests: &[
        MessageDesc {
            name: "lock_pointer",
            signature: &[
                ArgumentType::NewId,
                ArgumentType::Object(AllowNull::No),
                ArgumentType::Object(AllowNull::No),
                ArgumentType::Object(AllowNull::Yes),
            ],
            since: 1,
            is_destructor: false,
            child_interface: Some(&LOCKED_POINTER_INTERFACE),
            arg_interfaces: &[&WL_SURFACE_INTERFACE, &WL_SEAT_INTERFACE, &WL_REGION_INTERFACE],
        },
        MessageDesc {
            name: "confine_pointer",
            signature: &[
                ArgumentType::NewId,
                ArgumentType::Object(AllowNull::No),
                ArgumentType::Object(AllowNull::No),
                ArgumentType::Object(AllowNull::Yes),
            ],
            since: 1,
            is_destructor: false,
            child_interface: Some(&CONFINED_POINTER_INTERFACE),
            arg_interfaces: &[&WL_SURFACE_INTERFACE, &WL_SEAT_INTERFACE, &WL_REGION_INTERFACE],
        },
    ],
    events: &[],
};

/// Interface `_wl_locked_pointer`
pub static LOCKED_POINTER_INTERFACE: Interface = Interface {
    name: "_wl_locked_pointer",
    version: 1,
    requests: &[
        MessageDesc {
            name: "set_cursor_position_hint",
            signature: &[ArgumentType::Fixed, ArgumentType::Fixed],
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
            name: "locked",
            signature: &[],
            since: 1,
            is_destructor: false,
            child_interface: None,
            arg_interfaces: &[],
        },
        MessageDesc {
            name: "unlocked",
            signature: &[],
            since: 1,
            is_destructor: false,
            child_interface: None,
            arg_interfaces: &[],
        },
    ],
};

/// Interface `_wl_confined_pointer`
pub static CONFINED_POINTER_INTERFACE: Interface = Interface {
    name: "_wl_confined_pointer",
    version: 1,
    requests: &[MessageDesc {
        name: "destroy",
        signature: &[],
        since: 1,
        is_destructor: true,
        child_interface: None,
        arg_interfaces: &[],
    }],
    events: &[
        MessageDesc {
            name: "confined",
            signature: &[],
            since: 1,
            is_destructor: false,
            child_interface: None,
            arg_interfaces: &[],
        },
        MessageDesc {
            name: "unconfined",
            signature: &[],
            since: 1,
            is_destructor: false,
            child_interface: None,
            arg_interfaces: &[],
        },
    ],
};

/// Interface `_wl_relative_pointer_manager`
pub static RELATIVE_POINTER_MANAGER_INTERFACE: Interface = Interface {
    name: "_wl_relative_pointer_manager",
    version: 1,
    requests: &[MessageDesc {
        name: "get_relative_pointer",
        signature: &[ArgumentType::NewId, ArgumentType::Object(AllowNull::No)],
        since: 1,
        is_destructor: false,
        child_interface: Some(&RELATIVE_POINTER_INTERFACE),
        arg_interfaces: &[&WL_POINTER_INTERFACE],
    }],
    events: &[],
};

/// Interface `_wl_relative_pointer`
pub static RELATIVE_POINTER_INTERFACE: Interface = Interface {
    name: "_wl_relative_pointer",
    version: 1,
    requests: &[MessageDesc {
        name: "release",
        signature: &[],
        since: 1,
        is_destructor: true,
        child_interface: None,
        arg_interfaces: &[],
    }],
    events: &[MessageDesc {
        name: "relative_motion",
        signature: &[
            ArgumentType::Uint,
            ArgumentType::Int,
            ArgumentType::Int,
            ArgumentType::Int,
            ArgumentType::Int,
            ArgumentType::Int,
            ArgumentType::Int,
            ArgumentType::Int,
            ArgumentType::Int,
        ],
        since: 1,
        is_destructor: false,
        child_interface: None,
        arg_interfaces: &[],
    }],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn signatures(messages: &[MessageDesc]) -> Vec<(&'static str, String)> {
        messages.iter().map(|msg| (msg.name, msg.signature_string())).collect()
    }

    #[test]
    fn pointer_lock_catalog() {
        assert_eq!(
            signatures(POINTER_LOCK_INTERFACE.requests),
            [("lock_pointer", "noo?o".to_owned()), ("confine_pointer", "noo?o".to_owned())]
        );
        assert!(POINTER_LOCK_INTERFACE.events.is_empty());
        assert_eq!(
            signatures(LOCKED_POINTER_INTERFACE.requests),
            [("set_cursor_position_hint", "ff".to_owned()), ("destroy", String::new())]
        );
        assert_eq!(
            signatures(CONFINED_POINTER_INTERFACE.events),
            [("confined", String::new()), ("unconfined", String::new())]
        );
    }

    #[test]
    fn relative_pointer_catalog() {
        assert_eq!(
            signatures(RELATIVE_POINTER_MANAGER_INTERFACE.requests),
            [("get_relative_pointer", "no".to_owned())]
        );
        assert_eq!(
            signatures(RELATIVE_POINTER_INTERFACE.events),
            [("relative_motion", "uiiiiiiii".to_owned())]
        );
    }

    #[test]
    fn only_teardown_requests_are_destructors() {
        for iface in [
            &POINTER_LOCK_INTERFACE,
            &LOCKED_POINTER_INTERFACE,
            &CONFINED_POINTER_INTERFACE,
            &RELATIVE_POINTER_MANAGER_INTERFACE,
            &RELATIVE_POINTER_INTERFACE,
        ] {
            assert_eq!(iface.version, 1);
            for msg in iface.requests {
                assert_eq!(msg.is_destructor, msg.name == "destroy" || msg.name == "release");
            }
            assert!(iface.events.iter().all(|msg| !msg.is_destructor));
        }
    }
}
