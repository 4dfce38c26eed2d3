//! Command line surface and its validation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::{Error, ErrorKind, LineConfiguration, Result};

/// Longest accepted device path, in bytes
pub const MAX_DEVICE_LEN: usize = 29;
/// Longest accepted descriptor string, in bytes (`115200_8N1` is ten)
pub const MAX_CONFIG_LEN: usize = 10;
/// Longest accepted pattern, in bytes
pub const MAX_PATTERN_LEN: usize = 80;
/// Largest interval whose microsecond count still fits in 32 bits
pub const MAX_INTERVAL_SECS: f64 = u32::MAX as f64 / 1_000_000.0;

/// Interval used when none is given
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
/// Pattern used when none is given
pub const DEFAULT_PATTERN: &str = "The quick brown fox jumped over the lazy dog.";

/// Write a test pattern to a serial device at a fixed interval until interrupted.
#[derive(Clone, Debug, Parser)]
#[clap(
    name = "serialping",
    after_help = "The device configuration is <baud>_<size><parity><stop>, e.g. 115200_8N1.\n\
                  Parity is one of N (none), E (even) or O (odd)."
)]
pub struct Args {
    /// The serial device, e.g. /dev/ttyS0
    #[clap(short, long, env = "SERIALPING_DEVICE", value_name = "PATH")]
    pub device: String,

    /// The device configuration, e.g. 115200_8N1
    #[clap(short, long, env = "SERIALPING_CONFIG", value_name = "CONFIG")]
    pub config: String,

    /// Seconds between writes
    #[clap(
        short,
        long,
        env = "SERIALPING_INTERVAL",
        value_name = "SECONDS",
        default_value = "0.1"
    )]
    pub interval: String,

    /// The data pattern to send
    #[clap(
        short,
        long,
        env = "SERIALPING_PATTERN",
        value_name = "TEXT",
        default_value = DEFAULT_PATTERN
    )]
    pub pattern: String,
}

/// Validated arguments, ready to open a session with
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Path of the serial device
    pub device: PathBuf,
    /// Line framing to program
    pub config: LineConfiguration,
    /// Pause between writes
    pub interval: Duration,
    /// Bytes written on every tick
    pub pattern: String,
}

impl Args {
    /// Check every argument and parse the device configuration.
    ///
    /// Length limits and the interval are checked first, in command line order, then the
    /// descriptor. Only the first problem is reported.
    pub fn validate(&self) -> Result<Settings> {
        check_len("Device name", &self.device, MAX_DEVICE_LEN)?;
        check_len("Config string", &self.config, MAX_CONFIG_LEN)?;
        let interval = parse_interval(&self.interval)?;
        check_len("Pattern string", &self.pattern, MAX_PATTERN_LEN)?;

        let config = LineConfiguration::parse(&self.config)?;

        Ok(Settings {
            device: PathBuf::from(&self.device),
            config,
            interval,
            pattern: self.pattern.clone(),
        })
    }
}

fn check_len(what: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::new(
            ErrorKind::Argument,
            format!("{} is too long ({} bytes, at most {})", what, value.len(), max),
        ));
    }
    Ok(())
}

fn parse_interval(value: &str) -> Result<Duration> {
    let secs = value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::Argument,
                format!("Invalid interval {:?}, expected seconds", value),
            )
        })?;

    if secs > MAX_INTERVAL_SECS {
        return Err(Error::new(
            ErrorKind::Argument,
            format!(
                "Cannot have an interval larger than {} seconds",
                MAX_INTERVAL_SECS
            ),
        ));
    }

    let micros = (secs * 1_000_000.0).round() as u32;
    Ok(Duration::from_micros(u64::from(micros)))
}
