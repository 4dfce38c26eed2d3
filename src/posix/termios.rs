use nix::libc;
use nix::sys::termios::{
    cfsetspeed, BaudRate as TermiosBaud, ControlFlags, InputFlags, LocalFlags, OutputFlags,
    Termios,
};

use super::error::errno_error;
use crate::{BaudRate, DataBits, ErrorKind, LineConfiguration, Parity, Result, StopBits};

fn termios_baud(rate: BaudRate) -> TermiosBaud {
    match rate {
        BaudRate::B50 => TermiosBaud::B50,
        BaudRate::B75 => TermiosBaud::B75,
        BaudRate::B110 => TermiosBaud::B110,
        BaudRate::B134 => TermiosBaud::B134,
        BaudRate::B150 => TermiosBaud::B150,
        BaudRate::B200 => TermiosBaud::B200,
        BaudRate::B300 => TermiosBaud::B300,
        BaudRate::B600 => TermiosBaud::B600,
        BaudRate::B1200 => TermiosBaud::B1200,
        BaudRate::B2400 => TermiosBaud::B2400,
        BaudRate::B4800 => TermiosBaud::B4800,
        BaudRate::B9600 => TermiosBaud::B9600,
        BaudRate::B19200 => TermiosBaud::B19200,
        BaudRate::B38400 => TermiosBaud::B38400,
        BaudRate::B57600 => TermiosBaud::B57600,
        BaudRate::B115200 => TermiosBaud::B115200,
        BaudRate::B230400 => TermiosBaud::B230400,
    }
}

fn set_data_bits(termios: &mut Termios, data_bits: DataBits) {
    let size = match data_bits {
        DataBits::Five => ControlFlags::CS5,
        DataBits::Six => ControlFlags::CS6,
        DataBits::Seven => ControlFlags::CS7,
        DataBits::Eight => ControlFlags::CS8,
    };
    termios.control_flags.remove(ControlFlags::CSIZE);
    termios.control_flags.insert(size);
}

fn set_parity(termios: &mut Termios, parity: Parity) {
    match parity {
        Parity::None => {
            termios.control_flags.remove(ControlFlags::PARENB);
            termios.control_flags.remove(ControlFlags::PARODD);
        }
        Parity::Odd => {
            termios.control_flags.insert(ControlFlags::PARENB);
            termios.control_flags.insert(ControlFlags::PARODD);
        }
        Parity::Even => {
            termios.control_flags.insert(ControlFlags::PARENB);
            termios.control_flags.remove(ControlFlags::PARODD);
        }
    }
}

fn set_stop_bits(termios: &mut Termios, stop_bits: StopBits) {
    match stop_bits {
        StopBits::One => termios.control_flags.remove(ControlFlags::CSTOPB),
        StopBits::Two => termios.control_flags.insert(ControlFlags::CSTOPB),
    }
}

/// Build the attribute set for a raw, write-only line.
///
/// The result starts from an all-zero `termios` rather than the device's current settings, so
/// the framing never depends on whatever the port was left in. Input and output processing,
/// echo, signals and canonical mode are all off, modem control lines are ignored and the
/// receiver is disabled.
pub fn raw_termios(config: &LineConfiguration) -> Result<Termios> {
    // SAFETY: `termios` is a plain C struct for which all-zero bytes are a valid value.
    let zeroed: libc::termios = unsafe { std::mem::zeroed() };
    let mut termios = Termios::from(zeroed);

    termios.input_flags.remove(
        InputFlags::IGNBRK
            | InputFlags::BRKINT
            | InputFlags::PARMRK
            | InputFlags::ISTRIP
            | InputFlags::INLCR
            | InputFlags::IGNCR
            | InputFlags::ICRNL
            | InputFlags::IXON,
    );
    termios.output_flags.remove(OutputFlags::OPOST);
    termios.local_flags.remove(
        LocalFlags::ECHO
            | LocalFlags::ECHONL
            | LocalFlags::ICANON
            | LocalFlags::ISIG
            | LocalFlags::IEXTEN,
    );

    // Write-only: never wait on carrier detect and never enable the receiver.
    termios.control_flags.insert(ControlFlags::CLOCAL);
    termios.control_flags.remove(ControlFlags::CREAD);

    cfsetspeed(&mut termios, termios_baud(config.baud_rate())).map_err(|e| {
        errno_error(
            ErrorKind::DeviceConfigure,
            "Unable to set baud rate in terminal attributes",
            e,
        )
    })?;
    set_data_bits(&mut termios, config.data_bits());
    set_parity(&mut termios, config.parity());
    set_stop_bits(&mut termios, config.stop_bits());

    Ok(termios)
}
