use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::{ErrorKind as ClapErrorKind, Parser};
use log::{error, info};
use serialping::{stop_on_interrupt, Args, PingSession, SerialHandle, Settings};

/// Exit status for every setup failure
const FAILURE: i32 = -1;

fn run(settings: Settings) -> serialping::Result<()> {
    let handle = SerialHandle::open(&settings.device, &settings.config)?;

    let running = Arc::new(AtomicBool::new(true));
    stop_on_interrupt(Arc::clone(&running))?;

    info!(
        "Writing {} bytes to {} every {:?}",
        settings.pattern.len(),
        settings.device.display(),
        settings.interval
    );
    let mut session = PingSession::new(handle, settings.pattern, settings.interval, running);
    session.run();

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let status = match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => 0,
                _ => FAILURE,
            };
            let _ = e.print();
            process::exit(status);
        }
    };

    let result = args.validate().and_then(run);
    if let Err(e) = result {
        error!("{}", e);
        process::exit(FAILURE);
    }
}
