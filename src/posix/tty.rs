use std::io;
use std::os::unix::prelude::*;
use std::path::{Path, PathBuf};

use log::{debug, info};
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::sys::stat::Mode;
use nix::sys::termios::{tcdrain, tcsetattr, SetArg};
use nix::unistd::{access, AccessFlags};
use scopeguard::ScopeGuard;

use super::error::errno_error;
use super::termios::raw_termios;
use crate::{ErrorKind, LineConfiguration, Result};

/// Closes a file descriptor, ignoring errors.
fn close(fd: RawFd) {
    let _ = nix::unistd::close(fd);
}

/// Apply the raw-mode attributes for `config` to an open descriptor, effective immediately.
fn configure(fd: RawFd, config: &LineConfiguration) -> Result<()> {
    let termios = raw_termios(config)?;
    tcsetattr(fd, SetArg::TCSANOW, &termios).map_err(|e| {
        errno_error(
            ErrorKind::DeviceConfigure,
            "Unable to apply terminal attributes",
            e,
        )
    })
}

/// A serial device opened write-only and programmed into raw mode.
///
/// The line settings are applied once in [`SerialHandle::open`] and stay in effect until the
/// handle is dropped, which closes the device.
#[derive(Debug)]
pub struct SerialHandle {
    fd: RawFd,
    path: PathBuf,
    config: LineConfiguration,
}

impl SerialHandle {
    /// Opens the device at `path` and programs it with `config`.
    ///
    /// The device must already exist and be writable by the current user. It is opened
    /// non-blocking so a missing carrier cannot stall the open; blocking mode is restored
    /// before the line is configured, so writes block.
    ///
    /// If anything fails after the device was opened, it is closed again before the error is
    /// returned.
    ///
    /// ## Errors
    ///
    /// * `DevicePermission` if the device is not writable by the current user.
    /// * `DeviceOpen` if opening the device fails.
    /// * `DeviceConfigure` if the device rejects the line settings.
    pub fn open<P: AsRef<Path>>(path: P, config: &LineConfiguration) -> Result<SerialHandle> {
        let path = path.as_ref();

        access(path, AccessFlags::W_OK).map_err(|e| {
            errno_error(
                ErrorKind::DevicePermission,
                &format!(
                    "User does not have permission to write to {}",
                    path.display()
                ),
                e,
            )
        })?;

        let fd = nix::fcntl::open(
            path,
            OFlag::O_WRONLY | OFlag::O_NOCTTY | OFlag::O_NONBLOCK,
            Mode::empty(),
        )
        .map_err(|e| errno_error(ErrorKind::DeviceOpen, "open() call failed", e))?;
        let fd = scopeguard::guard(fd, |fd| {
            debug!("Closing {} after failed setup", path.display());
            close(fd);
        });

        // Clear the non-blocking flag set above.
        fcntl(*fd, FcntlArg::F_SETFL(OFlag::empty())).map_err(|e| {
            errno_error(
                ErrorKind::DeviceOpen,
                "Unable to restore blocking mode",
                e,
            )
        })?;

        configure(*fd, config)?;
        info!("Configured {} as {}", path.display(), config);

        Ok(SerialHandle {
            fd: ScopeGuard::into_inner(fd),
            path: path.to_path_buf(),
            config: *config,
        })
    }

    /// Returns the device path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the line settings in effect.
    pub fn config(&self) -> &LineConfiguration {
        &self.config
    }
}

impl Drop for SerialHandle {
    fn drop(&mut self) {
        debug!("Closing {}", self.path.display());
        close(self.fd);
    }
}

impl AsRawFd for SerialHandle {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl io::Write for SerialHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        nix::unistd::write(self.fd, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        tcdrain(self.fd).map_err(io::Error::from)
    }
}
