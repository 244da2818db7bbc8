use crate::utils::constants::FIELD_SEPARATOR;

/// Outcome of parsing one raw input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    Reading { station: &'a [u8], tenths: i64 },
    MissingSeparator,
    MalformedValue(&'a [u8]),
}

/// Split a `station;value` line on its first separator and convert the value
/// to tenths. Surrounding ASCII whitespace, including the line terminator, is
/// ignored.
pub fn parse_line(line: &[u8]) -> ParsedLine<'_> {
    let line = trim_ascii_whitespace(line);

    let Some(separator) = line.iter().position(|&b| b == FIELD_SEPARATOR) else {
        return ParsedLine::MissingSeparator;
    };

    let station = &line[..separator];
    let raw_value = &line[separator + 1..];

    match parse_fixed_point(trim_ascii_whitespace(raw_value)) {
        Some(tenths) => ParsedLine::Reading { station, tenths },
        None => ParsedLine::MalformedValue(raw_value),
    }
}

/// Parse a decimal such as `-12.3` into tenths (`-123`).
///
/// Digits past the first fractional one are truncated toward zero, so `3.79`
/// becomes `37` and `-3.79` becomes `-37`. The conversion never goes through
/// floating point. Returns `None` for anything that is not a plain decimal or
/// that overflows `i64`.
pub fn parse_fixed_point(bytes: &[u8]) -> Option<i64> {
    let (negative, unsigned) = match bytes.first()? {
        b'-' => (true, &bytes[1..]),
        b'+' => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let (integer, fraction) = match unsigned.iter().position(|&b| b == b'.') {
        Some(dot) => (&unsigned[..dot], &unsigned[dot + 1..]),
        None => (unsigned, &[][..]),
    };

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !integer.iter().chain(fraction).all(u8::is_ascii_digit) {
        return None;
    }

    let mut tenths: i64 = 0;
    for digit in integer {
        tenths = tenths
            .checked_mul(10)?
            .checked_add(i64::from(digit - b'0'))?;
    }
    let first_fraction = fraction.first().map_or(0, |d| i64::from(d - b'0'));
    tenths = tenths.checked_mul(10)?.checked_add(first_fraction)?;

    Some(if negative { -tenths } else { tenths })
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_point() {
        assert_eq!(parse_fixed_point(b"5.0"), Some(50));
        assert_eq!(parse_fixed_point(b"-12.3"), Some(-123));
        assert_eq!(parse_fixed_point(b"+7.1"), Some(71));
        assert_eq!(parse_fixed_point(b"42"), Some(420));
        assert_eq!(parse_fixed_point(b".5"), Some(5));
        assert_eq!(parse_fixed_point(b"5."), Some(50));
        assert_eq!(parse_fixed_point(b"-0.0"), Some(0));
    }

    #[test]
    fn test_parse_fixed_point_truncates() {
        assert_eq!(parse_fixed_point(b"3.79"), Some(37));
        assert_eq!(parse_fixed_point(b"-3.79"), Some(-37));
        assert_eq!(parse_fixed_point(b"0.09"), Some(0));
    }

    #[test]
    fn test_parse_fixed_point_rejects_garbage() {
        assert_eq!(parse_fixed_point(b""), None);
        assert_eq!(parse_fixed_point(b"-"), None);
        assert_eq!(parse_fixed_point(b"."), None);
        assert_eq!(parse_fixed_point(b"abc"), None);
        assert_eq!(parse_fixed_point(b"1.2.3"), None);
        assert_eq!(parse_fixed_point(b"1e5"), None);
        assert_eq!(parse_fixed_point(b"99999999999999999999"), None);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line(b"Hamburg;12.0\n"),
            ParsedLine::Reading {
                station: b"Hamburg",
                tenths: 120
            }
        );
        assert_eq!(
            parse_line(b"Bulawayo;-8.9\r\n"),
            ParsedLine::Reading {
                station: b"Bulawayo",
                tenths: -89
            }
        );
        assert_eq!(parse_line(b"no separator here\n"), ParsedLine::MissingSeparator);
        assert_eq!(parse_line(b"\n"), ParsedLine::MissingSeparator);
        assert_eq!(parse_line(b"B;abc\n"), ParsedLine::MalformedValue(b"abc"));
    }

    #[test]
    fn test_parse_line_splits_on_first_separator() {
        assert_eq!(parse_line(b"A;1.0;2.0"), ParsedLine::MalformedValue(b"1.0;2.0"));
    }

    #[test]
    fn test_parse_line_keeps_utf8_station_bytes() {
        let line = "São Paulo;25.3\n".as_bytes();
        assert_eq!(
            parse_line(line),
            ParsedLine::Reading {
                station: "São Paulo".as_bytes(),
                tenths: 253
            }
        );
    }
}
