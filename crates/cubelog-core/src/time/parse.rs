use super::NormalizedTime;
use crate::solve::RawTime;

/// Normalize a raw solve time.
///
/// Never fails: anything that cannot be read as a time becomes DNF, so one
/// corrupt log entry cannot break averaging over the rest.
pub fn parse(raw: &RawTime) -> NormalizedTime {
    match raw {
        RawTime::Seconds(seconds) => parse_seconds(*seconds),
        RawTime::Text(text) => parse_str(text),
    }
}

/// Normalize a numeric value given in seconds.
pub fn parse_seconds(seconds: f64) -> NormalizedTime {
    NormalizedTime::from_ms(seconds * 1000.0)
}

/// Normalize a textual time: `"DNF"`, `"12.34"`, `"1:02.345"`, `"62.3"`.
///
/// Numbers are read with prefix semantics, so trailing junk such as a unit
/// suffix (`"12.34s"`) is ignored.
pub fn parse_str(text: &str) -> NormalizedTime {
    if text.to_ascii_lowercase().contains("dnf") {
        return NormalizedTime::Dnf;
    }

    let text = text.trim();
    if text.is_empty() {
        return NormalizedTime::Dnf;
    }

    if let Some((minutes, rest)) = text.split_once(':') {
        let Some(minutes) = leading_integer(minutes) else {
            return NormalizedTime::Dnf;
        };
        let Some(seconds) = leading_decimal(rest) else {
            return NormalizedTime::Dnf;
        };
        return NormalizedTime::from_ms((minutes * 60.0 + seconds) * 1000.0);
    }

    match leading_decimal(text) {
        Some(seconds) => parse_seconds(seconds),
        None => NormalizedTime::Dnf,
    }
}

/// Unsigned base-10 integer prefix.
fn leading_integer(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    text[..end].parse::<f64>().ok()
}

/// Longest prefix that reads as a decimal number: `[sign] digits [. digits] [e [sign] digits]`.
fn leading_decimal(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    text[..i].parse::<f64>().ok()
}
