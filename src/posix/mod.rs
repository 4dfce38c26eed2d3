mod error;
mod interrupt;
mod termios;
mod tty;

pub use self::interrupt::stop_on_interrupt;
pub use self::termios::raw_termios;
pub use self::tty::SerialHandle;
