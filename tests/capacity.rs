//! Capacity boundaries, version selection and mode analysis

mod common;

use common::{encode_or_panic, init_test_tracing};
use styled_qr::{
    ECLevel, EncodeError, EncodeOptions, Mode, QrEncoder, Segment, Version, encode, encode_with,
};

#[test]
fn numeric_capacity_boundary_at_version_40_low() {
    init_test_tracing();
    let fits = "1".repeat(7089);
    let qr = encode_or_panic(&fits, ECLevel::L);
    assert_eq!(qr.version().number(), 40);
    assert_eq!(qr.size(), 177);
    assert_eq!(qr.mode(), Mode::Numeric);

    let too_long = "1".repeat(7090);
    let err = encode(&too_long, ECLevel::L).unwrap_err();
    assert!(matches!(err, EncodeError::DataTooLong { max_version: 40, .. }), "{err:?}");
}

#[test]
fn alphanumeric_and_byte_capacity_at_version_40_low() {
    assert!(encode(&"A".repeat(4296), ECLevel::L).is_ok());
    assert!(encode(&"A".repeat(4297), ECLevel::L).is_err());
    assert!(encode(&"a".repeat(2953), ECLevel::L).is_ok());
    assert!(encode(&"a".repeat(2954), ECLevel::L).is_err());
}

#[test]
fn mode_selection() {
    assert_eq!(encode_or_panic("12345", ECLevel::M).mode(), Mode::Numeric);
    assert_eq!(encode_or_panic("ABC 123", ECLevel::M).mode(), Mode::Alphanumeric);
    assert_eq!(encode_or_panic("hello", ECLevel::M).mode(), Mode::Byte);
    assert_eq!(Mode::detect("HELLO WORLD"), Mode::Alphanumeric);
}

#[test]
fn hello_world_quartile_is_version_one() {
    let qr = encode_or_panic("HELLO WORLD", ECLevel::Q);
    assert_eq!(qr.version(), Version::MIN);
    assert_eq!(qr.mode(), Mode::Alphanumeric);
    assert_eq!(qr.size(), 21);
    assert_eq!(qr.ec_level(), ECLevel::Q);
}

#[test]
fn smallest_version_grows_with_ec_level() {
    let data = "x".repeat(40);
    let versions: Vec<u8> = ECLevel::ALL
        .iter()
        .map(|&ec| encode_or_panic(&data, ec).version().number())
        .collect();
    assert!(versions.windows(2).all(|w| w[0] <= w[1]), "{versions:?}");
    assert!(versions[0] < versions[3]);
}

#[test]
fn fixed_version_is_never_upgraded() {
    let options = EncodeOptions {
        version: Some(1),
        ..EncodeOptions::new(ECLevel::H)
    };
    let err = encode_with(&"x".repeat(40), &options).unwrap_err();
    assert!(matches!(err, EncodeError::DataTooLong { max_version: 1, .. }), "{err:?}");

    let options = EncodeOptions {
        version: Some(5),
        ..EncodeOptions::new(ECLevel::M)
    };
    assert_eq!(encode_with("short", &options).unwrap().version().number(), 5);
}

#[test]
fn version_zero_means_automatic() {
    let auto = EncodeOptions {
        version: Some(0),
        ..EncodeOptions::new(ECLevel::M)
    };
    assert_eq!(encode_with("auto", &auto).unwrap().version(), Version::MIN);

    let invalid = EncodeOptions {
        version: Some(41),
        ..EncodeOptions::new(ECLevel::M)
    };
    assert_eq!(encode_with("auto", &invalid).unwrap_err(), EncodeError::InvalidVersion(41));
}

#[test]
fn forced_mode_rejects_illegal_characters() {
    let options = EncodeOptions {
        mode: Some(Mode::Alphanumeric),
        ..EncodeOptions::new(ECLevel::M)
    };
    let err = encode_with("lower case", &options).unwrap_err();
    assert!(matches!(err, EncodeError::Encoding { mode: Mode::Alphanumeric, .. }), "{err:?}");
}

#[test]
fn encoding_is_deterministic() {
    let a = encode_or_panic("determinism check 42", ECLevel::H);
    let b = encode_or_panic("determinism check 42", ECLevel::H);
    assert_eq!(a, b);
}

#[test]
fn multi_segment_payload_fits_where_single_byte_segment_is_larger() {
    let mixed = QrEncoder::new(ECLevel::M)
        .add_segment(Segment::alphanumeric("ORDER NUMBER ").unwrap())
        .add_segment(Segment::numeric("0123456789012345").unwrap())
        .encode()
        .unwrap();
    let single = encode_or_panic("ORDER NUMBER 0123456789012345", ECLevel::M);
    assert!(mixed.version() <= single.version());
}
