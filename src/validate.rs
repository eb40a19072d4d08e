//! Format predicates for the token grammars.
//!
//! Each recognizer is a full-match check over a short ASCII string.

/// Callsign: `[P{1,3}/]C{1,3}D C{0,3}L[/Q{1,2}]`, where `P`/`C` are
/// alphanumerics, `D` a digit, `L` a letter and `Q` one of `AMPRT`.
pub fn is_callsign(s: &str) -> bool {
    let parts: Vec<&str> = s.split('/').collect();
    match parts.as_slice() {
        [core] => is_call_core(core),
        [first, second] => {
            (is_call_prefix(first) && is_call_core(second))
                || (is_call_core(first) && is_call_suffix(second))
        }
        [prefix, core, suffix] => {
            is_call_prefix(prefix) && is_call_core(core) && is_call_suffix(suffix)
        }
        _ => false,
    }
}

fn is_call_prefix(s: &str) -> bool {
    (1..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn is_call_suffix(s: &str) -> bool {
    (1..=2).contains(&s.len())
        && s
            .bytes()
            .all(|b| matches!(b.to_ascii_uppercase(), b'A' | b'M' | b'P' | b'R' | b'T'))
}

fn is_call_core(s: &str) -> bool {
    let b = s.as_bytes();
    if !(3..=8).contains(&b.len())
        || !b.iter().all(u8::is_ascii_alphanumeric)
        || !b[b.len() - 1].is_ascii_alphabetic()
    {
        return false;
    }
    // Some split must leave 1-3 leading chars, a digit, then 0-3 before the final letter.
    (1..=3).any(|lead| {
        lead < b.len() - 1 && b[lead].is_ascii_digit() && b.len() - 1 - (lead + 1) <= 3
    })
}

/// Maidenhead locator with 4, 6 or 8 characters.
pub fn is_locator(s: &str) -> bool {
    let b = s.as_bytes();
    let field = |c: u8| matches!(c.to_ascii_uppercase(), b'A'..=b'R');
    let subsquare = |c: u8| matches!(c.to_ascii_uppercase(), b'A'..=b'X');
    match b.len() {
        4 | 6 | 8 => {
            field(b[0])
                && field(b[1])
                && b[2].is_ascii_digit()
                && b[3].is_ascii_digit()
                && (b.len() < 6 || (subsquare(b[4]) && subsquare(b[5])))
                && (b.len() < 8 || (b[6].is_ascii_digit() && b[7].is_ascii_digit()))
        }
        _ => false,
    }
}

/// Splits `Name(GRID)` or `Name (GRID)` into name and locator.
pub fn split_composite_locator(s: &str) -> Option<(&str, &str)> {
    let inner = s.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let name = inner[..open].trim_end();
    let grid = &inner[open + 1..];
    if name.is_empty() || name.contains(['(', ')']) || !is_locator(grid) {
        return None;
    }
    Some((name, grid))
}

/// Calendar date `YYYYMMDD`, year 1000-9999, day 01-31.
pub fn is_date(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 8 || !b.iter().all(u8::is_ascii_digit) || b[0] == b'0' {
        return false;
    }
    let month = two_digits(b[4], b[5]);
    let day = two_digits(b[6], b[7]);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Time of day `HHMM`.
pub fn is_time(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 4 || !b.iter().all(u8::is_ascii_digit) {
        return false;
    }
    two_digits(b[0], b[1]) <= 23 && two_digits(b[2], b[3]) <= 59
}

/// Signal report: `R[S[T]][Q]` with R 1-5, S and T 1-9, or a signed dB delta.
pub fn is_rst(s: &str) -> bool {
    let b = s.as_bytes();
    match b.first() {
        Some(b'+' | b'-') => (2..=3).contains(&b.len()) && b[1..].iter().all(u8::is_ascii_digit),
        Some(b'1'..=b'5') => {
            let rest = &b[1..];
            let digits = rest.iter().take_while(|c| matches!(c, b'1'..=b'9')).count();
            let tail = &rest[digits..];
            match (digits, tail) {
                (0..=2, []) => true,
                (1..=2, [q]) => matches!(q.to_ascii_uppercase(), b'A' | b'C' | b'K' | b'M' | b'S' | b'X'),
                _ => false,
            }
        }
        _ => false,
    }
}

/// Unsigned decimal: digits with at most one point, not starting with it.
pub fn is_decimal(s: &str) -> bool {
    let b = s.as_bytes();
    !b.is_empty()
        && b[0].is_ascii_digit()
        && b.iter().all(|c| c.is_ascii_digit() || *c == b'.')
        && b.iter().filter(|c| **c == b'.').count() <= 1
}

/// Legacy band shortcut shape: one or two chars from `-0123456789`.
pub fn is_shortcut_number(s: &str) -> bool {
    (1..=2).contains(&s.len()) && s.bytes().all(|c| c == b'-' || c.is_ascii_digit())
}

fn two_digits(hi: u8, lo: u8) -> u8 {
    (hi - b'0') * 10 + (lo - b'0')
}
