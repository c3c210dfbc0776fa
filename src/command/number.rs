// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lenient integer decoding.

/// Decodes the leading integer of `s` the way the device firmware does.
///
/// Leading ASCII whitespace is skipped, then an optional `+` or `-` sign and
/// as many decimal digits as follow. Anything after the digits is ignored.
/// Input without leading digits decodes to `0`. Values beyond `i32` saturate.
///
/// # Examples
///
/// ```
/// use particle_home::command::parse_leading_int;
///
/// assert_eq!(parse_leading_int("12abc"), 12);
/// assert_eq!(parse_leading_int("  -3"), -3);
/// assert_eq!(parse_leading_int("abc"), 0);
/// assert_eq!(parse_leading_int(""), 0);
/// ```
#[must_use]
pub fn parse_leading_int(s: &str) -> i32 {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value * 10 + i64::from(digit - b'0');
        if value > i64::from(i32::MAX) + 1 {
            break;
        }
    }

    let value = if negative { -value } else { value };
    i32::try_from(value).unwrap_or(if negative { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_digits() {
        assert_eq!(parse_leading_int("0"), 0);
        assert_eq!(parse_leading_int("1"), 1);
        assert_eq!(parse_leading_int("42"), 42);
    }

    #[test]
    fn signs() {
        assert_eq!(parse_leading_int("-5"), -5);
        assert_eq!(parse_leading_int("+5"), 5);
        assert_eq!(parse_leading_int("-"), 0);
        assert_eq!(parse_leading_int("--5"), 0);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_eq!(parse_leading_int("1x"), 1);
        assert_eq!(parse_leading_int("0.5"), 0);
        assert_eq!(parse_leading_int("7 8"), 7);
    }

    #[test]
    fn non_numeric_defaults_to_zero() {
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("x1"), 0);
    }

    #[test]
    fn leading_whitespace_is_skipped() {
        assert_eq!(parse_leading_int(" \t1"), 1);
    }

    #[test]
    fn overflow_saturates() {
        assert_eq!(parse_leading_int("99999999999999999999"), i32::MAX);
        assert_eq!(parse_leading_int("-99999999999999999999"), i32::MIN);
        assert_eq!(parse_leading_int("-2147483648"), i32::MIN);
    }
}
