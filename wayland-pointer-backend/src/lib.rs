//! Backend API for the Wayland pointer-lock and relative-pointer extensions
//!
//! This crate provides the protocol-level plumbing the typed bindings of
//! `wayland-pointer-client` are built on:
//!
//! - the description types of the protocol ([`protocol`] module): interfaces, messages and their
//!   arguments, protocol errors;
//! - the fixed-point codecs used by the extensions' numeric arguments ([`fixed`] module);
//! - the descriptors of the core interfaces the extensions reference ([`core_interfaces`]);
//! - the object table of a client connection ([`client`] module), which validates requests before
//!   handing them to an external [`Transport`](client::Transport) and routes incoming events to
//!   the data associated with their target object.
//!
//! Socket handling and message framing are not part of this crate: the runtime that owns the
//! Wayland socket implements [`Transport`](client::Transport) and feeds received events to
//! [`Backend::dispatch_message()`](client::Backend::dispatch_message).
//!
//! ## Logging
//!
//! This crate can generate some runtime error message (notably when a protocol error occurs). With
//! the default `log` cargo feature, those are piped through the `log` crate, along with debug-level
//! traces of every request sent and event dispatched. Without it, errors are printed to stderr.
//!
//! Setting the `WAYLAND_DEBUG` environment variable to `1` or `client` additionally prints every
//! message to stderr, in the same format as libwayland.

#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(unstable_coverage, feature(coverage_attribute))]

/// Reexport of the `smallvec` crate, which is part of `wayland-pointer-backend`'s public API.
pub extern crate smallvec;

/// Helper macro for quickly making a [`Message`][crate::protocol::Message]
#[macro_export]
macro_rules! message {
    ($sender_id: expr, $opcode: expr, [$($args: expr),* $(,)?] $(,)?) => {
        $crate::protocol::Message {
            sender_id: $sender_id,
            opcode: $opcode,
            args: $crate::smallvec::smallvec![$($args),*],
        }
    }
}

// internal imports for dispatching logging depending on the `log` feature
#[cfg(feature = "log")]
#[allow(unused_imports)]
use log::{debug as log_debug, error as log_error, info as log_info, warn as log_warn};
#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
use std::{
    eprintln as log_error, eprintln as log_warn, eprintln as log_info, eprintln as log_debug,
};

#[cfg(test)]
mod test;

pub mod client;
pub mod core_interfaces;
pub mod debug;
pub mod fixed;
mod map;
pub mod protocol;
mod types;
