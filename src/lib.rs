//! serialping puts a serial device into raw, write-only mode and repeatedly transmits a fixed
//! text pattern on it.
//!
//! It is meant as a diagnostic for serial links: checking cabling, watching line behavior on a
//! scope or exercising receiver logic on the far end. The line is described by a compact
//! descriptor string such as `115200_8N1` (baud rate, character size, parity and stop bits).
//!
//! ```no_run
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use serialping::{LineConfiguration, PingSession, SerialHandle};
//!
//! let config: LineConfiguration = "115200_8N1".parse()?;
//! let handle = SerialHandle::open("/dev/ttyUSB0", &config)?;
//!
//! let running = Arc::new(AtomicBool::new(true));
//! let mut session = PingSession::new(handle, "ping", Duration::from_millis(100), running);
//! session.run();
//! # Ok::<(), serialping::Error>(())
//! ```
#![deny(
    clippy::dbg_macro,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(rust_2018_idioms)]

use std::error::Error as StdError;
use std::fmt;
use std::io;

mod args;
mod config;
mod session;

pub use crate::args::{
    Args, Settings, DEFAULT_INTERVAL, DEFAULT_PATTERN, MAX_CONFIG_LEN, MAX_DEVICE_LEN,
    MAX_INTERVAL_SECS, MAX_PATTERN_LEN,
};
pub use crate::config::{BaudRate, DataBits, LineConfiguration, Parity, StopBits};
pub use crate::session::PingSession;

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod posix;
        pub use crate::posix::{raw_termios, stop_on_interrupt, SerialHandle};
    } else {
        compile_error!("serialping only supports POSIX terminal devices");
    }
}

/// A type for results generated while configuring or driving a serial line
pub type Result<T> = std::result::Result<T, Error>;

/// Ways a descriptor string can be structurally malformed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// There is no `_` between the baud rate and the framing fields.
    MissingSeparator,
    /// The framing fields after the `_` are not exactly three characters.
    FieldLength,
}

/// Categories of errors that can occur while setting up or driving a serial line
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A command line argument is missing, too long or out of range.
    Argument,
    /// The descriptor string does not have the `<baud>_<size><parity><stop>` shape.
    ConfigFormat(FormatError),
    /// The baud rate is not one of the supported rates.
    InvalidBaudRate,
    /// The character size is not 5, 6, 7 or 8.
    InvalidCharacterSize,
    /// The parity is not `N`, `E` or `O`.
    InvalidParity,
    /// The number of stop bits is not 1 or 2.
    InvalidStopBits,
    /// The device is not writable by the current user.
    DevicePermission,
    /// Opening the device failed.
    DeviceOpen,
    /// The device rejected the line settings.
    DeviceConfigure,
    /// An I/O error occurred while transmitting.
    Io(io::ErrorKind),
}

/// An error type for serial line setup and transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The kind of error this is
    pub kind: ErrorKind,
    /// A description of the error suitable for end-users
    pub description: String,
}

impl Error {
    /// Instantiates a new error
    pub fn new<T: Into<String>>(kind: ErrorKind, description: T) -> Self {
        Error {
            kind,
            description: description.into(),
        }
    }

    /// Returns the corresponding `ErrorKind` for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        fmt.write_str(&self.description)
    }
}

impl StdError for Error {}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::new(ErrorKind::Io(io_error.kind()), format!("{}", io_error))
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> io::Error {
        let kind = match error.kind {
            ErrorKind::Argument
            | ErrorKind::ConfigFormat(_)
            | ErrorKind::InvalidBaudRate
            | ErrorKind::InvalidCharacterSize
            | ErrorKind::InvalidParity
            | ErrorKind::InvalidStopBits => io::ErrorKind::InvalidInput,
            ErrorKind::DevicePermission => io::ErrorKind::PermissionDenied,
            ErrorKind::DeviceOpen | ErrorKind::DeviceConfigure => io::ErrorKind::Other,
            ErrorKind::Io(kind) => kind,
        };
        io::Error::new(kind, error.description)
    }
}
