use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rstest::rstest;
use rstest_reuse::{self, apply, template};
use serialping::{
    BaudRate, DataBits, ErrorKind, FormatError, LineConfiguration, Parity, StopBits,
};

#[template]
#[rstest]
#[case("8N1", DataBits::Eight, Parity::None, StopBits::One)]
#[case("7E2", DataBits::Seven, Parity::Even, StopBits::Two)]
#[case("7O1", DataBits::Seven, Parity::Odd, StopBits::One)]
#[case("6N2", DataBits::Six, Parity::None, StopBits::Two)]
#[case("5O2", DataBits::Five, Parity::Odd, StopBits::Two)]
fn framings(
    #[case] framing: &str,
    #[case] data_bits: DataBits,
    #[case] parity: Parity,
    #[case] stop_bits: StopBits,
) {
}

#[apply(framings)]
fn test_framing_at_every_rate(
    #[case] framing: &str,
    #[case] data_bits: DataBits,
    #[case] parity: Parity,
    #[case] stop_bits: StopBits,
) {
    for rate in BaudRate::ALL {
        let descriptor = format!("{}_{}", rate, framing);
        let config: LineConfiguration = descriptor.parse().unwrap();

        assert_eq!(config.baud_rate(), rate);
        assert_eq!(config.data_bits(), data_bits);
        assert_eq!(config.parity(), parity);
        assert_eq!(config.stop_bits(), stop_bits);
        assert_eq!(config.to_string(), descriptor);
    }
}

#[apply(framings)]
fn test_framing_is_checked_after_baud(
    #[case] framing: &str,
    #[case] _data_bits: DataBits,
    #[case] _parity: Parity,
    #[case] _stop_bits: StopBits,
) {
    let err = LineConfiguration::parse(&format!("12345_{}", framing)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidBaudRate);
}

#[rstest]
#[case("115200", ErrorKind::ConfigFormat(FormatError::MissingSeparator))]
#[case("", ErrorKind::ConfigFormat(FormatError::MissingSeparator))]
#[case("115200_", ErrorKind::ConfigFormat(FormatError::FieldLength))]
#[case("115200_8N", ErrorKind::ConfigFormat(FormatError::FieldLength))]
#[case("115200_8N11", ErrorKind::ConfigFormat(FormatError::FieldLength))]
#[case("x_8N", ErrorKind::ConfigFormat(FormatError::FieldLength))]
#[case("_8N1", ErrorKind::InvalidBaudRate)]
#[case("0_8N1", ErrorKind::InvalidBaudRate)]
#[case("-9600_8N1", ErrorKind::InvalidBaudRate)]
#[case(" 9600_8N1", ErrorKind::InvalidBaudRate)]
#[case("fast_8N1", ErrorKind::InvalidBaudRate)]
#[case("128000_8N1", ErrorKind::InvalidBaudRate)]
#[case("460800_8N1", ErrorKind::InvalidBaudRate)]
#[case("0_9X3", ErrorKind::InvalidBaudRate)]
#[case("9600_9N1", ErrorKind::InvalidCharacterSize)]
#[case("9600_4N1", ErrorKind::InvalidCharacterSize)]
#[case("9600_9X3", ErrorKind::InvalidCharacterSize)]
#[case("9600_8n1", ErrorKind::InvalidParity)]
#[case("9600_8M1", ErrorKind::InvalidParity)]
#[case("9600_8S3", ErrorKind::InvalidParity)]
#[case("9600_8N0", ErrorKind::InvalidStopBits)]
#[case("9600_8N3", ErrorKind::InvalidStopBits)]
#[case("9600__8N", ErrorKind::InvalidCharacterSize)]
fn test_rejected_descriptor(#[case] descriptor: &str, #[case] expected: ErrorKind) {
    let err = LineConfiguration::parse(descriptor).unwrap_err();
    assert_eq!(err.kind(), expected, "{:?}: {}", descriptor, err);
}

#[test]
fn test_plus_sign_on_baud_is_accepted() {
    let config: LineConfiguration = "+9600_8N1".parse().unwrap();
    assert_eq!(config.baud_rate(), BaudRate::B9600);
}

#[quickcheck]
fn prop_missing_separator(descriptor: String) -> TestResult {
    if descriptor.contains('_') {
        return TestResult::discard();
    }
    let err = LineConfiguration::parse(&descriptor).unwrap_err();
    TestResult::from_bool(err.kind() == ErrorKind::ConfigFormat(FormatError::MissingSeparator))
}

#[quickcheck]
fn prop_wrong_field_length(baud: String, framing: String) -> TestResult {
    if baud.contains('_') || framing.len() == 3 {
        return TestResult::discard();
    }
    let err = LineConfiguration::parse(&format!("{}_{}", baud, framing)).unwrap_err();
    TestResult::from_bool(err.kind() == ErrorKind::ConfigFormat(FormatError::FieldLength))
}

#[quickcheck]
fn prop_unsupported_rate(rate: u32) -> TestResult {
    if BaudRate::try_from(rate).is_ok() {
        return TestResult::discard();
    }
    let err = LineConfiguration::parse(&format!("{}_8N1", rate)).unwrap_err();
    TestResult::from_bool(err.kind() == ErrorKind::InvalidBaudRate)
}

#[quickcheck]
fn prop_negative_rate(rate: i64) -> bool {
    let descriptor = format!("{}_8N1", -(rate.unsigned_abs() as i128) - 1);
    LineConfiguration::parse(&descriptor).unwrap_err().kind() == ErrorKind::InvalidBaudRate
}

#[quickcheck]
fn prop_invalid_character_size(size: char) -> TestResult {
    if !size.is_ascii() || ('5'..='8').contains(&size) {
        return TestResult::discard();
    }
    let err = LineConfiguration::parse(&format!("9600_{}N1", size)).unwrap_err();
    TestResult::from_bool(err.kind() == ErrorKind::InvalidCharacterSize)
}

#[quickcheck]
fn prop_invalid_parity(parity: char) -> TestResult {
    if !parity.is_ascii() || "NEO".contains(parity) {
        return TestResult::discard();
    }
    let err = LineConfiguration::parse(&format!("9600_8{}1", parity)).unwrap_err();
    TestResult::from_bool(err.kind() == ErrorKind::InvalidParity)
}

#[quickcheck]
fn prop_invalid_stop_bits(stop_bits: char) -> TestResult {
    if !stop_bits.is_ascii() || stop_bits == '1' || stop_bits == '2' {
        return TestResult::discard();
    }
    let err = LineConfiguration::parse(&format!("9600_8N{}", stop_bits)).unwrap_err();
    TestResult::from_bool(err.kind() == ErrorKind::InvalidStopBits)
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_round_trip() {
    let config: LineConfiguration = "38400_7O2".parse().unwrap();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<LineConfiguration>(&json).unwrap(), config);
}
