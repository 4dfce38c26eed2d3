//! Kept as its own test binary with a single test so no other test opens descriptors while the
//! count is taken.
#![cfg(target_os = "linux")]


use config::{pty, Pty};
use rstest::rstest;
use serialping::{ErrorKind, LineConfiguration, SerialHandle};

fn open_fds() -> usize {
    std::fs::read_dir("/proc/self/fd").unwrap().count()
}

#[rstest]
fn test_device_is_closed_on_every_path(pty: Pty) {
    let config: LineConfiguration = "9600_8N1".parse().unwrap();
    let not_a_tty =
        std::env::temp_dir().join(format!("serialping-fd-{}.txt", std::process::id()));
    std::fs::write(&not_a_tty, b"").unwrap();

    let before = open_fds();

    // Failed configuration closes the descriptor it opened.
    for _ in 0..50 {
        let err = SerialHandle::open(&not_a_tty, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeviceConfigure);
    }
    assert_eq!(open_fds(), before);

    // A configured handle holds exactly one descriptor until dropped.
    let handle = SerialHandle::open(&pty.path, &config).unwrap();
    assert_eq!(open_fds(), before + 1);
    drop(handle);
    assert_eq!(open_fds(), before);

    std::fs::remove_file(&not_a_tty).unwrap();
}
