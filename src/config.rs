//! Parsing of line descriptor strings such as `115200_8N1`.
//!
//! A descriptor is the baud rate, an underscore and three framing characters: the character
//! size (`5`-`8`), the parity (`N`, `E` or `O`) and the number of stop bits (`1` or `2`).
//! Fields are checked in that order and parsing stops at the first bad one, so every failure
//! names exactly one problem.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind, FormatError, Result};

/// Separator between the baud rate and the framing fields
const SEPARATOR: char = '_';

/// Number of framing characters following the separator
const FRAMING_FIELDS: usize = 3;

/// Line signaling rates accepted in a descriptor
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum BaudRate {
    B50,
    B75,
    B110,
    B134,
    B150,
    B200,
    B300,
    B600,
    B1200,
    B2400,
    B4800,
    B9600,
    B19200,
    B38400,
    B57600,
    B115200,
    B230400,
}

impl BaudRate {
    /// Every supported rate, slowest first
    pub const ALL: [BaudRate; 17] = [
        BaudRate::B50,
        BaudRate::B75,
        BaudRate::B110,
        BaudRate::B134,
        BaudRate::B150,
        BaudRate::B200,
        BaudRate::B300,
        BaudRate::B600,
        BaudRate::B1200,
        BaudRate::B2400,
        BaudRate::B4800,
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
        BaudRate::B230400,
    ];

    /// Symbols per second
    pub fn bits_per_second(self) -> u32 {
        match self {
            BaudRate::B50 => 50,
            BaudRate::B75 => 75,
            BaudRate::B110 => 110,
            BaudRate::B134 => 134,
            BaudRate::B150 => 150,
            BaudRate::B200 => 200,
            BaudRate::B300 => 300,
            BaudRate::B600 => 600,
            BaudRate::B1200 => 1200,
            BaudRate::B2400 => 2400,
            BaudRate::B4800 => 4800,
            BaudRate::B9600 => 9600,
            BaudRate::B19200 => 19200,
            BaudRate::B38400 => 38400,
            BaudRate::B57600 => 57600,
            BaudRate::B115200 => 115_200,
            BaudRate::B230400 => 230_400,
        }
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits_per_second())
    }
}

impl From<BaudRate> for u32 {
    fn from(value: BaudRate) -> Self {
        value.bits_per_second()
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = ();

    fn try_from(value: u32) -> core::result::Result<Self, Self::Error> {
        BaudRate::ALL
            .iter()
            .copied()
            .find(|rate| rate.bits_per_second() == value)
            .ok_or(())
    }
}

/// Number of bits per character
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    /// 5 bits per character
    Five,
    /// 6 bits per character
    Six,
    /// 7 bits per character
    Seven,
    /// 8 bits per character
    Eight,
}

impl fmt::Display for DataBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

impl From<DataBits> for u8 {
    fn from(value: DataBits) -> Self {
        match value {
            DataBits::Five => 5,
            DataBits::Six => 6,
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

impl TryFrom<u8> for DataBits {
    type Error = ();

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            5 => Ok(Self::Five),
            6 => Ok(Self::Six),
            7 => Ok(Self::Seven),
            8 => Ok(Self::Eight),
            _ => Err(()),
        }
    }
}

/// Parity checking modes
///
/// When parity checking is enabled (`Odd` or `Even`) an extra bit is transmitted with
/// each character. The value of the parity bit is arranged so that the number of 1 bits in the
/// character (including the parity bit) is an even number (`Even`) or an odd number
/// (`Odd`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    /// No parity bit.
    None,
    /// Parity bit sets odd number of 1 bits.
    Odd,
    /// Parity bit sets even number of 1 bits.
    Even,
}

impl Parity {
    fn letter(self) -> char {
        match self {
            Parity::None => 'N',
            Parity::Odd => 'O',
            Parity::Even => 'E',
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Parity::None => write!(f, "None"),
            Parity::Odd => write!(f, "Odd"),
            Parity::Even => write!(f, "Even"),
        }
    }
}

/// Number of stop bits
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    /// One stop bit.
    One,
    /// Two stop bits.
    Two,
}

impl fmt::Display for StopBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

impl From<StopBits> for u8 {
    fn from(value: StopBits) -> Self {
        match value {
            StopBits::One => 1,
            StopBits::Two => 2,
        }
    }
}

impl TryFrom<u8> for StopBits {
    type Error = ();

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(()),
        }
    }
}

/// Complete framing of a serial line
///
/// Only obtainable by parsing a descriptor (or from its already-validated parts), so every
/// value describes a line that can actually be programmed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineConfiguration {
    baud_rate: BaudRate,
    data_bits: DataBits,
    parity: Parity,
    stop_bits: StopBits,
}

impl LineConfiguration {
    /// Assemble a configuration from validated parts.
    pub fn new(
        baud_rate: BaudRate,
        data_bits: DataBits,
        parity: Parity,
        stop_bits: StopBits,
    ) -> Self {
        LineConfiguration {
            baud_rate,
            data_bits,
            parity,
            stop_bits,
        }
    }

    /// Parse a descriptor string like `115200_8N1`.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let (baud, framing) = descriptor.split_once(SEPARATOR).ok_or_else(|| {
            Error::new(
                ErrorKind::ConfigFormat(FormatError::MissingSeparator),
                "Character Size, Parity, and Stop Bit length not specified",
            )
        })?;

        let text = framing;
        let framing = framing.as_bytes();
        if framing.len() != FRAMING_FIELDS {
            return Err(Error::new(
                ErrorKind::ConfigFormat(FormatError::FieldLength),
                "Character Size, Parity, and Stop Bit length improperly specified",
            ));
        }

        let baud_rate = baud
            .parse::<u32>()
            .ok()
            .and_then(|rate| BaudRate::try_from(rate).ok())
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidBaudRate,
                    format!("Invalid Baud Rate specified: {:?}", baud),
                )
            })?;

        let data_bits = match framing[0] {
            b'5' => DataBits::Five,
            b'6' => DataBits::Six,
            b'7' => DataBits::Seven,
            b'8' => DataBits::Eight,
            other => {
                return Err(Error::new(
                    ErrorKind::InvalidCharacterSize,
                    format!(
                        "Invalid Character Size specified: {}",
                        describe(text, 0, other)
                    ),
                ))
            }
        };

        let parity = match framing[1] {
            b'N' => Parity::None,
            b'E' => Parity::Even,
            b'O' => Parity::Odd,
            other => {
                return Err(Error::new(
                    ErrorKind::InvalidParity,
                    format!(
                        "Invalid Parity specified: {}",
                        describe(text, 1, other)
                    ),
                ))
            }
        };

        let stop_bits = match framing[2] {
            b'1' => StopBits::One,
            b'2' => StopBits::Two,
            other => {
                return Err(Error::new(
                    ErrorKind::InvalidStopBits,
                    format!(
                        "Invalid number of Stop Bits specified: {}",
                        describe(text, 2, other)
                    ),
                ))
            }
        };

        Ok(LineConfiguration::new(baud_rate, data_bits, parity, stop_bits))
    }

    /// Returns the baud rate.
    pub fn baud_rate(&self) -> BaudRate {
        self.baud_rate
    }

    /// Returns the character size.
    pub fn data_bits(&self) -> DataBits {
        self.data_bits
    }

    /// Returns the parity mode.
    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// Returns the number of stop bits.
    pub fn stop_bits(&self) -> StopBits {
        self.stop_bits
    }
}

/// Quote the character starting at byte `index` of `framing`, or show the raw byte when
/// `index` falls inside a multi-byte character.
fn describe(framing: &str, index: usize, byte: u8) -> String {
    match framing.get(index..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("{:?}", c),
        None => format!("byte 0x{:02X}", byte),
    }
}

impl FromStr for LineConfiguration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LineConfiguration::parse(s)
    }
}

/// Formats as the canonical descriptor, so `Display` and `FromStr` agree.
impl fmt::Display for LineConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.baud_rate,
            SEPARATOR,
            self.data_bits,
            self.parity.letter(),
            self.stop_bits
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_descriptors() {
        let config = LineConfiguration::parse("115200_8N1").unwrap();
        assert_eq!(config.baud_rate(), BaudRate::B115200);
        assert_eq!(config.data_bits(), DataBits::Eight);
        assert_eq!(config.parity(), Parity::None);
        assert_eq!(config.stop_bits(), StopBits::One);

        let config = LineConfiguration::parse("9600_7E2").unwrap();
        assert_eq!(config.baud_rate(), BaudRate::B9600);
        assert_eq!(config.data_bits(), DataBits::Seven);
        assert_eq!(config.parity(), Parity::Even);
        assert_eq!(config.stop_bits(), StopBits::Two);
    }

    #[test]
    fn display_is_canonical_descriptor() {
        let config = LineConfiguration::new(
            BaudRate::B57600,
            DataBits::Five,
            Parity::Odd,
            StopBits::Two,
        );
        assert_eq!(config.to_string(), "57600_5O2");
    }

    #[test]
    fn every_listed_rate_converts_back() {
        for rate in BaudRate::ALL {
            assert_eq!(BaudRate::try_from(u32::from(rate)), Ok(rate));
        }
        assert_eq!(BaudRate::try_from(0), Err(()));
        assert_eq!(BaudRate::try_from(128_000), Err(()));
    }

    #[test]
    fn zero_baud_is_an_ordinary_invalid_rate() {
        let err = LineConfiguration::parse("0_8N1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBaudRate);
    }

    #[test]
    fn trailing_garbage_in_baud_is_rejected() {
        let err = LineConfiguration::parse("9600x_8N1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBaudRate);
    }

    #[test]
    fn non_ascii_field_is_named_in_full() {
        let err = LineConfiguration::parse("9600_\u{e9}1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCharacterSize);
        assert_eq!(err.description, "Invalid Character Size specified: '\u{e9}'");

        let err = LineConfiguration::parse("9600_8\u{e9}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParity);
        assert_eq!(err.description, "Invalid Parity specified: '\u{e9}'");
    }

    #[test]
    fn byte_inside_a_character_is_shown_in_hex() {
        assert_eq!(describe("\u{e9}1", 1, 0xA9), "byte 0xA9");
        assert_eq!(describe("8X1", 1, b'X'), "'X'");
    }

    #[test]
    fn data_bits_conversions() {
        assert_eq!(DataBits::try_from(7), Ok(DataBits::Seven));
        assert_eq!(DataBits::try_from(9), Err(()));
        assert_eq!(u8::from(DataBits::Five), 5);
        assert_eq!(StopBits::try_from(0), Err(()));
    }
}
