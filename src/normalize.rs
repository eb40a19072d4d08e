//! Conversions from recognized raw tokens to canonical field values.

/// Free-text tokens use `_` in place of spaces.
pub fn underscores_to_spaces(s: &str) -> String {
    s.replace('_', " ")
}

/// Completes a date shortcut from the stored date.
///
/// 6 digits borrow the century, 4 the year, 2 the year and month. Other
/// lengths are returned unchanged for the validator to reject.
pub fn expand_date(short: &str, current: &str) -> String {
    let borrow = match short.len() {
        6 => 2,
        4 => 4,
        2 => 6,
        _ => 0,
    };
    match current.get(..borrow) {
        Some(prefix) if borrow > 0 => format!("{prefix}{short}"),
        _ => short.to_string(),
    }
}

/// Completes a two-digit minute shortcut with the stored hour.
pub fn expand_time(short: &str, current: &str) -> String {
    match current.get(..2) {
        Some(hour) if short.len() == 2 => format!("{hour}{short}"),
        _ => short.to_string(),
    }
}

/// Rescales a kHz decimal to MHz by shifting the decimal point.
///
/// Returns `None` for a zero value, which clears the frequency.
pub fn khz_to_mhz(khz: &str) -> Option<String> {
    let (int_part, frac_part) = khz.split_once('.').unwrap_or((khz, ""));
    if int_part.bytes().chain(frac_part.bytes()).all(|b| b == b'0') {
        return None;
    }

    let padded = format!("{int_part:0>4}");
    let (mhz, khz_digits) = padded.split_at(padded.len() - 3);
    let mhz = mhz.trim_start_matches('0');
    let mhz = if mhz.is_empty() { "0" } else { mhz };
    let frac = format!("{khz_digits}{frac_part}");
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        Some(mhz.to_string())
    } else {
        Some(format!("{mhz}.{frac}"))
    }
}

/// Uppercases the field letters of a locator, keeping the rest as typed.
pub fn normalize_locator(grid: &str) -> String {
    let split = grid.len().min(2);
    format!("{}{}", grid[..split].to_ascii_uppercase(), &grid[split..])
}

/// Serial numbers are zero-padded to three digits.
pub fn format_serial(n: u32) -> String {
    format!("{n:03}")
}

/// Parses an exchange as an unsigned serial number.
pub fn parse_serial(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `YYYYMMDD` to `YYYY-MM-DD`.
pub fn adif_date_to_iso(date: &str) -> String {
    match (date.get(..4), date.get(4..6), date.get(6..8)) {
        (Some(y), Some(m), Some(d)) => format!("{y}-{m}-{d}"),
        _ => date.to_string(),
    }
}

/// `HHMM[SS]` to `HH:MM`.
pub fn adif_time_to_iso(time: &str) -> String {
    match (time.get(..2), time.get(2..4)) {
        (Some(h), Some(m)) => format!("{h}:{m}"),
        _ => time.to_string(),
    }
}
