//! Property-based tests for packed-decimal conversion.
//! Every two-digit value survives a round trip; nothing else encodes.

#![allow(clippy::arithmetic_side_effects)]

use time_svc::bcd;
use time_svc::ConversionError;

proptest::proptest! {
    /// encode/decode round trip over the whole representable range.
    #[test]
    fn round_trip(value in 0u8..=99) {
        let packed = bcd::encode(value).unwrap_or(0xFF);
        proptest::prop_assert!(bcd::is_valid(packed));
        proptest::prop_assert_eq!(bcd::decode(packed), Ok(value));
    }

    /// Values above 99 are rejected, never truncated.
    #[test]
    fn rejects_three_digit_values(value in 100u8..=255) {
        proptest::prop_assert_eq!(bcd::encode(value), Err(ConversionError::NotTwoDigits(value)));
    }

    /// decode accepts exactly the bytes is_valid accepts.
    #[test]
    fn decode_agrees_with_is_valid(byte in proptest::num::u8::ANY) {
        proptest::prop_assert_eq!(bcd::decode(byte).is_ok(), bcd::is_valid(byte));
    }

    /// Decoded value re-encodes to the same byte.
    #[test]
    fn decode_then_encode_is_identity(tens in 0u8..=9, units in 0u8..=9) {
        let byte = (tens << 4) | units;
        let value = bcd::decode(byte);
        proptest::prop_assert_eq!(value.and_then(bcd::encode), Ok(byte));
    }
}
