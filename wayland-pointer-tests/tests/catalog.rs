mod helpers;

use helpers::{backend::protocol::Interface, wayc};
use wayc::{
    protocol::{
        confined_pointer::{self, ConfinedPointer},
        locked_pointer::{self, LockedPointer},
        pointer_lock::{self, PointerLockManager},
        relative_pointer::{self, RelativePointer},
        relative_pointer_manager::{self, RelativePointerManager},
    },
    Proxy,
};

fn describe(messages: &[wayc::backend::protocol::MessageDesc]) -> Vec<String> {
    messages
        .iter()
        .map(|msg| {
            let signature = msg.signature_string();
            let mut parts: Vec<&str> = vec![msg.name];
            if !signature.is_empty() {
                parts.push(&signature);
            }
            if msg.is_destructor {
                parts.push("destructor");
            }
            if let Some(child) = msg.child_interface {
                parts.extend(["->", child.name]);
            }
            parts.join(" ")
        })
        .collect()
}

fn arg_interfaces(iface: &Interface, opcode: usize) -> Vec<&'static str> {
    iface.requests[opcode].arg_interfaces.iter().map(|i| i.name).collect()
}

#[test]
fn pointer_lock() {
    let iface = PointerLockManager::interface();
    assert_eq!(iface.name, "_wl_pointer_lock");
    assert_eq!(iface.version, 1);
    assert_eq!(
        describe(iface.requests),
        [
            "lock_pointer noo?o -> _wl_locked_pointer",
            "confine_pointer noo?o -> _wl_confined_pointer"
        ]
    );
    assert!(iface.events.is_empty());
    assert_eq!(arg_interfaces(iface, 0), ["wl_surface", "wl_seat", "wl_region"]);
    assert_eq!(arg_interfaces(iface, 1), ["wl_surface", "wl_seat", "wl_region"]);
    assert_eq!(pointer_lock::REQ_LOCK_POINTER_OPCODE, 0);
    assert_eq!(pointer_lock::REQ_CONFINE_POINTER_OPCODE, 1);
}

#[test]
fn locked_pointer() {
    let iface = LockedPointer::interface();
    assert_eq!(iface.name, "_wl_locked_pointer");
    assert_eq!(iface.version, 1);
    assert_eq!(describe(iface.requests), ["set_cursor_position_hint ff", "destroy destructor"]);
    assert_eq!(describe(iface.events), ["locked", "unlocked"]);
    assert_eq!(locked_pointer::REQ_DESTROY_OPCODE, 1);
    assert_eq!(locked_pointer::EVT_UNLOCKED_OPCODE, 1);
}

#[test]
fn confined_pointer() {
    let iface = ConfinedPointer::interface();
    assert_eq!(iface.name, "_wl_confined_pointer");
    assert_eq!(iface.version, 1);
    assert_eq!(describe(iface.requests), ["destroy destructor"]);
    assert_eq!(describe(iface.events), ["confined", "unconfined"]);
    assert_eq!(confined_pointer::REQ_DESTROY_OPCODE, 0);
    assert_eq!(confined_pointer::EVT_UNCONFINED_OPCODE, 1);
}

#[test]
fn relative_pointer() {
    let manager = RelativePointerManager::interface();
    assert_eq!(manager.name, "_wl_relative_pointer_manager");
    assert_eq!(manager.version, 1);
    assert_eq!(describe(manager.requests), ["get_relative_pointer no -> _wl_relative_pointer"]);
    assert_eq!(arg_interfaces(manager, 0), ["wl_pointer"]);
    assert_eq!(relative_pointer_manager::REQ_GET_RELATIVE_POINTER_OPCODE, 0);

    let iface = RelativePointer::interface();
    assert_eq!(iface.name, "_wl_relative_pointer");
    assert_eq!(iface.version, 1);
    assert_eq!(describe(iface.requests), ["release destructor"]);
    assert_eq!(describe(iface.events), ["relative_motion uiiiiiiii"]);
    assert_eq!(relative_pointer::EVT_RELATIVE_MOTION_OPCODE, 0);
}

#[test]
fn every_message_is_available_from_version_1() {
    for iface in [
        PointerLockManager::interface(),
        LockedPointer::interface(),
        ConfinedPointer::interface(),
        RelativePointerManager::interface(),
        RelativePointer::interface(),
    ] {
        assert!(iface.requests.iter().chain(iface.events).all(|msg| msg.since == 1));
    }
    assert_eq!(locked_pointer::REQ_SET_CURSOR_POSITION_HINT_SINCE, 1);
    assert_eq!(relative_pointer::EVT_RELATIVE_MOTION_SINCE, 1);
}
