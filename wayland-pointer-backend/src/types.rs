//! Error types of the backend

use std::{fmt, io, sync::Arc};

use crate::protocol::ProtocolError;

/// The reason a connection died
///
/// Once stored, the error is returned by every later operation on the connection, so it is cheap
/// to clone: the I/O error of the transport is shared rather than rebuilt.
#[derive(Clone, Debug)]
pub enum WaylandError {
    /// The transport failed to carry a request
    Io(Arc<io::Error>),
    /// The server sent something this client cannot accept
    Protocol(ProtocolError),
}

impl WaylandError {
    /// The protocol error, if this is one
    pub fn as_protocol(&self) -> Option<&ProtocolError> {
        match self {
            Self::Protocol(err) => Some(err),
            Self::Io(_) => None,
        }
    }
}

impl std::error::Error for WaylandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(&**err),
            Self::Protocol(err) => Some(err),
        }
    }
}

impl fmt::Display for WaylandError {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Transport error: {err}"),
            Self::Protocol(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl From<ProtocolError> for WaylandError {
    fn from(err: ProtocolError) -> Self {
        Self::Protocol(err)
    }
}

impl From<io::Error> for WaylandError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

/// The object is not usable on this connection
///
/// It was destroyed, was never known to this connection, or the connection itself is dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidId;

impl std::error::Error for InvalidId {}

impl fmt::Display for InvalidId {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid ObjectId")
    }
}
