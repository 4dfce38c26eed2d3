use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, warn};

/// Repeatedly writes one pattern to a configured line until told to stop.
///
/// `running` is shared with whoever may end the session (normally the interrupt waiter from
/// [`stop_on_interrupt`](crate::stop_on_interrupt)). It is checked once per tick, so after it is
/// cleared at most one more interval passes before [`run`](PingSession::run) returns.
#[derive(Debug)]
pub struct PingSession<W> {
    line: W,
    pattern: Vec<u8>,
    interval: Duration,
    running: Arc<AtomicBool>,
}

impl<W: Write> PingSession<W> {
    /// Create a session writing `pattern` to `line` every `interval`.
    pub fn new<P: Into<Vec<u8>>>(
        line: W,
        pattern: P,
        interval: Duration,
        running: Arc<AtomicBool>,
    ) -> Self {
        PingSession {
            line,
            pattern: pattern.into(),
            interval,
            running,
        }
    }

    /// Transmit the pattern once.
    ///
    /// A failed write is logged and otherwise ignored; the next tick tries again.
    pub fn tick(&mut self) {
        println!("Sent: {}", timestamp(SystemTime::now()));
        match self.line.write(&self.pattern) {
            Ok(n) if n < self.pattern.len() => {
                debug!("Short write: {} of {} bytes", n, self.pattern.len())
            }
            Ok(_) => {}
            Err(e) => warn!("write: {}", e),
        }
    }

    /// Tick every interval until `running` is cleared. Returns the number of ticks.
    pub fn run(&mut self) -> u64 {
        let mut ticks = 0;
        while self.running.load(Ordering::SeqCst) {
            self.tick();
            ticks += 1;
            thread::sleep(self.interval);
        }
        debug!("Session stopped after {} ticks", ticks);
        ticks
    }

    /// Consume the session, handing back the line.
    pub fn into_inner(self) -> W {
        self.line
    }
}

/// `<epoch seconds>.<microseconds>` with the microseconds zero-padded to six digits
fn timestamp(now: SystemTime) -> String {
    let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:06}", since_epoch.as_secs(), since_epoch.subsec_micros())
}
