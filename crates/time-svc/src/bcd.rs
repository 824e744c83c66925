//! Packed-decimal (BCD) fields.
//!
//! One byte holds two decimal digits: tens in the high nibble, units in the
//! low nibble. `0x59` is fifty-nine. Only `0..=99` is representable, and a
//! nibble above 9 is an encoding error, not a value.

use crate::error::ConversionError;

/// Largest two-digit value.
pub const MAX_VALUE: u8 = 99;

/// Pack `value` into two BCD digits.
///
/// # Errors
///
/// [`ConversionError::NotTwoDigits`] if `value > 99`.
#[allow(clippy::arithmetic_side_effects)] // value <= 99: no overflow, divisor is a non-zero constant
pub const fn encode(value: u8) -> Result<u8, ConversionError> {
    if value > MAX_VALUE {
        return Err(ConversionError::NotTwoDigits(value));
    }
    Ok(((value / 10) << 4) | (value % 10))
}

/// Unpack a BCD byte.
///
/// # Errors
///
/// [`ConversionError::InvalidBcd`] if either nibble is above 9.
#[allow(clippy::arithmetic_side_effects)] // tens <= 9, units <= 9: result <= 99
pub const fn decode(bcd: u8) -> Result<u8, ConversionError> {
    let tens = bcd >> 4;
    let units = bcd & 0x0F;
    if tens > 9 || units > 9 {
        return Err(ConversionError::InvalidBcd(bcd));
    }
    Ok(tens * 10 + units)
}

/// `true` if both nibbles of `bcd` are decimal digits.
#[must_use]
pub const fn is_valid(bcd: u8) -> bool {
    (bcd >> 4) <= 9 && (bcd & 0x0F) <= 9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_values() {
        assert_eq!(encode(0), Ok(0x00));
        assert_eq!(encode(9), Ok(0x09));
        assert_eq!(encode(10), Ok(0x10));
        assert_eq!(encode(59), Ok(0x59));
        assert_eq!(encode(99), Ok(0x99));
    }

    #[test]
    fn decodes_known_values() {
        assert_eq!(decode(0x00), Ok(0));
        assert_eq!(decode(0x23), Ok(23));
        assert_eq!(decode(0x99), Ok(99));
    }

    #[test]
    fn rejects_values_above_99() {
        assert_eq!(encode(100), Err(ConversionError::NotTwoDigits(100)));
        assert_eq!(encode(u8::MAX), Err(ConversionError::NotTwoDigits(255)));
    }

    #[test]
    fn rejects_non_decimal_nibbles() {
        assert_eq!(decode(0x0A), Err(ConversionError::InvalidBcd(0x0A)));
        assert_eq!(decode(0xA0), Err(ConversionError::InvalidBcd(0xA0)));
        assert_eq!(decode(0xFF), Err(ConversionError::InvalidBcd(0xFF)));
        assert!(!is_valid(0x1F));
        assert!(is_valid(0x42));
    }

    #[test]
    fn round_trips_every_two_digit_value() {
        for n in 0..=MAX_VALUE {
            assert_eq!(encode(n).and_then(decode), Ok(n));
        }
    }

    #[test]
    fn exactly_100_bytes_are_valid_bcd() {
        let valid = (0..=u8::MAX).filter(|b| is_valid(*b)).count();
        assert_eq!(valid, 100);
    }
}
