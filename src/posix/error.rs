use nix::errno::Errno;

use crate::{Error, ErrorKind};

/// Wrap a failed system call into an `Error` of the given kind, keeping the OS description.
pub(crate) fn errno_error(kind: ErrorKind, context: &str, errno: Errno) -> Error {
    Error::new(kind, format!("{}: {}", context, errno.desc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_context_and_os_description() {
        let error = errno_error(ErrorKind::DeviceOpen, "open() call failed", Errno::ENOENT);
        assert_eq!(error.kind(), ErrorKind::DeviceOpen);
        assert!(error.description.starts_with("open() call failed: "));
        assert!(error.description.ends_with(Errno::ENOENT.desc()));
    }
}
