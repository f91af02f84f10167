//! Types and utilities for manipulating the pointer extension protocols

use std::fmt;

/// Describes whether an argument may have a null value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AllowNull {
    /// Null values are allowed.
    Yes,
    /// Null values are forbidden.
    No,
}

/// Enum of possible argument types as recognized by the wire
///
/// Only the argument kinds used by the pointer-lock and relative-pointer
/// extensions are represented.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ArgumentType {
    /// An integer argument. Represented by a [`i32`].
    Int,
    /// An unsigned integer argument. Represented by a [`u32`].
    Uint,
    /// A signed fixed point number with 1/256 precision
    Fixed,
    /// Id of a wayland object
    Object(AllowNull),
    /// Id of a newly created wayland object
    NewId,
}

impl ArgumentType {
    /// Returns true if the type of the argument is the same.
    pub fn same_type(self, other: Self) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }

    /// The compact notation of this type, as used in libwayland message tables
    pub fn code(self) -> &'static str {
        match self {
            Self::Int => "i",
            Self::Uint => "u",
            Self::Fixed => "f",
            Self::Object(AllowNull::No) => "o",
            Self::Object(AllowNull::Yes) => "?o",
            Self::NewId => "n",
        }
    }
}

/// Enum of possible argument of the protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument<Id> {
    /// An integer argument. Represented by a [`i32`].
    Int(i32),
    /// An unsigned integer argument. Represented by a [`u32`].
    Uint(u32),
    /// A signed fixed point number with 1/256 precision
    Fixed(i32),
    /// Id of a wayland object
    Object(Id),
    /// Id of a newly created wayland object
    NewId(Id),
}

impl<Id> Argument<Id> {
    /// Retrieve the type of a given argument instance
    pub fn get_type(&self) -> ArgumentType {
        match *self {
            Self::Int(_) => ArgumentType::Int,
            Self::Uint(_) => ArgumentType::Uint,
            Self::Fixed(_) => ArgumentType::Fixed,
            Self::Object(_) => ArgumentType::Object(AllowNull::Yes),
            Self::NewId(_) => ArgumentType::NewId,
        }
    }

    /// Map some closure on the object ids contained in this argument
    pub fn map_id<T>(self, f: impl FnOnce(Id) -> T) -> Argument<T> {
        match self {
            Self::Int(val) => Argument::Int(val),
            Self::Uint(val) => Argument::Uint(val),
            Self::Fixed(val) => Argument::Fixed(val),
            Self::Object(val) => Argument::Object(f(val)),
            Self::NewId(val) => Argument::NewId(f(val)),
        }
    }
}

impl<Id: fmt::Display> fmt::Display for Argument<Id> {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Uint(value) => write!(f, "{value}"),
            Self::Fixed(value) => write!(f, "{:.4}", crate::fixed::fixed_to_f64(*value)),
            Self::Object(value) => write!(f, "{value}"),
            Self::NewId(value) => write!(f, "new id {value}"),
        }
    }
}

/// Description of wayland interface.
///
/// An interface describes the possible requests and events that a wayland client and compositor use to
/// communicate.
#[derive(Debug)]
pub struct Interface {
    /// The name of the interface.
    pub name: &'static str,
    /// The maximum supported version of the interface.
    pub version: u32,
    /// A list that describes every request this interface supports.
    pub requests: &'static [MessageDesc],
    /// A list that describes every event this interface supports.
    pub events: &'static [MessageDesc],
}

impl fmt::Display for Interface {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Wire metadata of a given message
#[derive(Copy, Clone, Debug)]
pub struct MessageDesc {
    /// Name of this message
    pub name: &'static str,
    /// Signature of the message
    pub signature: &'static [ArgumentType],
    /// Minimum required version of the interface
    pub since: u32,
    /// Whether this message is a destructor
    pub is_destructor: bool,
    /// The child interface created from this message.
    ///
    /// In the wayland xml format, this corresponds to the `new_id` type.
    pub child_interface: Option<&'static Interface>,
    /// The interfaces passed into this message as arguments.
    pub arg_interfaces: &'static [&'static Interface],
}

impl MessageDesc {
    /// The signature of this message in compact notation, e.g. `"noo?o"`
    pub fn signature_string(&self) -> String {
        self.signature.iter().map(|arg| arg.code()).collect()
    }
}

/// Special interface representing an anonymous object
pub static ANONYMOUS_INTERFACE: Interface =
    Interface { name: "<anonymous>", version: 0, requests: &[], events: &[] };

/// Description of the protocol-level information of an object
#[derive(Copy, Clone, Debug)]
pub struct ObjectInfo {
    /// The protocol ID
    pub id: u32,
    /// The interface
    pub interface: &'static Interface,
    /// The version
    pub version: u32,
}

/// A protocol error
///
/// This kind of error is fatal to the connection: once it has been raised, the
/// transport is expected to tear the connection down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolError {
    /// The error code associated with the error
    pub code: u32,
    /// The id of the object that caused the error
    pub object_id: u32,
    /// The interface of the object that caused the error
    pub object_interface: String,
    /// A message describing the error
    pub message: String,
}

impl std::error::Error for ProtocolError {}

impl fmt::Display for ProtocolError {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "Protocol error {} on object {}@{}: {}",
            self.code, self.object_interface, self.object_id, self.message
        )
    }
}

/// Number of arguments that are stocked inline in a `Message` before allocating
///
/// `relative_motion` carries nine arguments and is the only message that spills.
pub const INLINE_ARGS: usize = 4;

/// Represents a message that has been sent from some object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message<Id> {
    /// The id of the object that sent the message.
    pub sender_id: Id,
    /// The opcode of the message.
    pub opcode: u16,
    /// The arguments of the message.
    pub args: smallvec::SmallVec<[Argument<Id>; INLINE_ARGS]>,
}

impl<Id> Message<Id> {
    /// Map some closure on all ids contained in this message, to change the Id generic parameter.
    pub fn map_id<T>(self, mut f: impl FnMut(Id) -> T) -> Message<T> {
        Message {
            sender_id: f(self.sender_id),
            opcode: self.opcode,
            args: self.args.into_iter().map(|arg| arg.map_id(&mut f)).collect(),
        }
    }
}

/// Returns true if the two interfaces are the same.
#[inline]
pub fn same_interface(a: &'static Interface, b: &'static Interface) -> bool {
    std::ptr::eq(a, b) || a.name == b.name
}

pub(crate) fn check_for_signature<Id>(signature: &[ArgumentType], args: &[Argument<Id>]) -> bool {
    if signature.len() != args.len() {
        return false;
    }
    for (typ, arg) in signature.iter().copied().zip(args.iter()) {
        if !arg.get_type().same_type(typ) {
            return false;
        }
    }
    true
}

#[inline]
pub(crate) fn same_interface_or_anonymous(a: &'static Interface, b: &'static Interface) -> bool {
    same_interface(a, b) || same_interface(a, &ANONYMOUS_INTERFACE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_check_rejects_wrong_arity_and_kind() {
        let sig = [ArgumentType::Uint, ArgumentType::Int];
        assert!(check_for_signature::<u32>(&sig, &[Argument::Uint(1), Argument::Int(-1)]));
        assert!(!check_for_signature::<u32>(&sig, &[Argument::Uint(1)]));
        assert!(!check_for_signature::<u32>(&sig, &[Argument::Int(1), Argument::Int(-1)]));
    }

    #[test]
    fn nullability_does_not_change_object_kind() {
        assert!(ArgumentType::Object(AllowNull::Yes).same_type(ArgumentType::Object(AllowNull::No)));
        assert!(!ArgumentType::Object(AllowNull::No).same_type(ArgumentType::NewId));
    }

    #[test]
    fn map_id_touches_every_object() {
        let msg: Message<u32> = crate::message!(3, 0, [Argument::NewId(4), Argument::Object(5)]);
        let mapped = msg.map_id(|id| id * 10);
        assert_eq!(mapped.sender_id, 30);
        assert_eq!(&mapped.args[..], &[Argument::NewId(40), Argument::Object(50)]);
    }
}
