use num_bigint::BigInt;
use num_traits::Num;
use thiserror::Error;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("base {0} is not supported, expected a base between 2 and 36")]
    UnsupportedBase(u32),
    #[error("value is empty")]
    EmptyValue,
    #[error("digit {digit:?} is not valid in base {base}")]
    InvalidDigit { digit: char, base: u32 },
    #[error(transparent)]
    Unparsable(#[from] num_bigint::ParseBigIntError),
}

/// Decodes `value`, written in `base`, into an arbitrary-precision integer.
///
/// The value may carry a single leading `+` or `-`. Letters are accepted in either case.
/// # Arguments
/// * `value` - The digits of the number.
/// * `base` - The base the digits are written in, between 2 and 36.
/// # Errors
/// * `DecodeError::UnsupportedBase` - If `base` is outside of [2, 36].
/// * `DecodeError::EmptyValue` - If `value` has no digit.
/// * `DecodeError::InvalidDigit` - If a character is not a digit of `base`.
pub fn decode(value: &str, base: u32) -> Result<BigInt, DecodeError> {
    check_base(base)?;

    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if digits.is_empty() {
        return Err(DecodeError::EmptyValue);
    }
    // `from_str_radix` tolerates `_` separators, those are not digits here
    if let Some(digit) = digits.chars().find(|c| !c.is_digit(base)) {
        return Err(DecodeError::InvalidDigit { digit, base });
    }

    let magnitude = BigInt::from_str_radix(digits, base)?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Writes `value` in `base` with lowercase letters, the inverse of [`decode`].
pub fn encode(value: &BigInt, base: u32) -> Result<String, DecodeError> {
    check_base(base)?;
    Ok(value.to_str_radix(base))
}

fn check_base(base: u32) -> Result<(), DecodeError> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(DecodeError::UnsupportedBase(base));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_common_bases() {
        assert_eq!(decode("4", 10).unwrap(), BigInt::from(4));
        assert_eq!(decode("111", 2).unwrap(), BigInt::from(7));
        assert_eq!(decode("213", 4).unwrap(), BigInt::from(39));
        assert_eq!(decode("ff", 16).unwrap(), BigInt::from(255));
        assert_eq!(decode("zz", 36).unwrap(), BigInt::from(36 * 36 - 1));
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(decode("FF", 16).unwrap(), decode("ff", 16).unwrap());
        assert_eq!(decode("aBc", 13).unwrap(), BigInt::from(10 * 169 + 11 * 13 + 12));
    }

    #[test]
    fn test_decode_signed_values() {
        assert_eq!(decode("-101", 2).unwrap(), BigInt::from(-5));
        assert_eq!(decode("+101", 2).unwrap(), BigInt::from(5));
        assert_eq!(decode("-0", 10).unwrap(), BigInt::from(0));
    }

    #[test]
    fn test_decode_beyond_native_width() {
        // 2^128 does not fit in a u128
        let value = decode("100000000000000000000000000000000", 16).unwrap();
        assert_eq!(value, BigInt::from(u128::MAX) + 1);
        assert_eq!(
            decode("340282366920938463463374607431768211456", 10).unwrap(),
            value
        );
    }

    #[test]
    fn test_decode_invalid_digit() {
        assert_eq!(
            decode("12", 2),
            Err(DecodeError::InvalidDigit {
                digit: '2',
                base: 2
            })
        );
        assert_eq!(
            decode("1_000", 10),
            Err(DecodeError::InvalidDigit {
                digit: '_',
                base: 10
            })
        );
        assert_eq!(
            decode(" 7", 10),
            Err(DecodeError::InvalidDigit {
                digit: ' ',
                base: 10
            })
        );
        assert_eq!(
            decode("--1", 10),
            Err(DecodeError::InvalidDigit {
                digit: '-',
                base: 10
            })
        );
    }

    #[test]
    fn test_decode_empty_value() {
        assert_eq!(decode("", 10), Err(DecodeError::EmptyValue));
        assert_eq!(decode("-", 10), Err(DecodeError::EmptyValue));
    }

    #[test]
    fn test_unsupported_base() {
        assert_eq!(decode("0", 1), Err(DecodeError::UnsupportedBase(1)));
        assert_eq!(decode("0", 37), Err(DecodeError::UnsupportedBase(37)));
        assert_eq!(
            encode(&BigInt::from(3), 0),
            Err(DecodeError::UnsupportedBase(0))
        );
    }

    #[test]
    fn test_random_values_survive_encoding() {
        for _ in 0..200 {
            let base = rand::random_range(MIN_BASE..=MAX_BASE);
            let value = BigInt::from(rand::random::<u128>()) * rand::random::<u64>();
            let encoded = encode(&value, base).unwrap();
            assert_eq!(decode(&encoded, base).unwrap(), value);
        }
    }
}
