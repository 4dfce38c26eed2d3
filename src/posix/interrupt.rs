use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{info, warn};
use nix::sys::signal::{SigSet, Signal};

use super::error::errno_error;
use crate::{Error, ErrorKind, Result};

/// Clear `running` the first time the process receives SIGINT.
///
/// SIGINT is blocked in the calling thread and picked up by a dedicated waiter thread instead of
/// an asynchronous handler, so the flag is the only state the interrupt touches. Threads spawned
/// by the caller afterwards inherit the blocked mask; call this before starting any other
/// threads.
pub fn stop_on_interrupt(running: Arc<AtomicBool>) -> Result<()> {
    let mut mask = SigSet::empty();
    mask.add(Signal::SIGINT);
    mask.thread_block().map_err(|e| {
        errno_error(
            ErrorKind::Io(io::ErrorKind::Other),
            "Unable to block SIGINT",
            e,
        )
    })?;

    thread::Builder::new()
        .name("sigint".into())
        .spawn(move || match mask.wait() {
            Ok(signal) => {
                info!("Received {:?}, stopping", signal);
                running.store(false, Ordering::SeqCst);
            }
            Err(e) => warn!("Waiting for SIGINT failed: {}", e.desc()),
        })
        .map_err(Error::from)?;

    Ok(())
}
