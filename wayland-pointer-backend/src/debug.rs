//! `WAYLAND_DEBUG` tracing
//!
//! When the variable is `1` or `client`, every request sent and every event dispatched is printed
//! to stderr in the layout libwayland uses, so traces from both libraries can be read together.

use std::{
    fmt::{self, Display},
    time::{SystemTime, UNIX_EPOCH},
};

use crate::protocol::Argument;

/// Whether `WAYLAND_DEBUG` asks for client-side tracing
pub fn has_debug_client_env() -> bool {
    matches!(std::env::var_os("WAYLAND_DEBUG"), Some(value) if value == "1" || value == "client")
}

/// Which way a traced message travels
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// A request, client to server
    Request,
    /// An event, server to client
    Event,
}

impl Direction {
    fn arrow(self) -> &'static str {
        match self {
            Self::Request => "->",
            Self::Event => "<-",
        }
    }
}

/// One traced message, borrowing its pieces from the caller
#[derive(Debug)]
pub struct Trace<'a, Id> {
    /// Direction of the message
    pub direction: Direction,
    /// Interface name of the sender or receiver
    pub interface: &'a str,
    /// Protocol id of the sender or receiver
    pub id: u32,
    /// Name of the request or event
    pub message: &'a str,
    /// Resolved arguments
    pub args: &'a [Argument<Id>],
    /// Set for messages that are dropped instead of being sent or delivered
    pub discarded: bool,
}

impl<Id: Display> Display for Trace<'_, Id> {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.discarded {
            f.write_str("[discarded]")?;
        }
        write!(
            f,
            " {} {}@{}.{}({})",
            self.direction.arrow(),
            self.interface,
            self.id,
            self.message,
            DisplaySlice(self.args)
        )
    }
}

/// Print a message to stderr as `[timestamp] -> interface@id.message(args)`
#[cfg_attr(unstable_coverage, coverage(off))]
pub fn print<Id: Display>(trace: Trace<'_, Id>) {
    eprintln!("{}{trace}", Timestamp::now());
}

pub(crate) struct DisplaySlice<'a, D>(pub &'a [D]);

impl<D: Display> Display for DisplaySlice<'_, D> {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, val) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{val}")?;
        }
        Ok(())
    }
}

// milliseconds, wrapped to 32 bits like libwayland's
struct Timestamp(Option<u32>);

impl Timestamp {
    fn now() -> Self {
        Self(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|elapsed| (elapsed.as_micros() / 1000) as u32),
        )
    }
}

impl Display for Timestamp {
    #[cfg_attr(unstable_coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(millis) => write!(f, "[{:7}.{:03}][rs]", millis / 1000, millis % 1000),
            None => Ok(()),
        }
    }
}
