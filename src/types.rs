//! Shared lookup tables for bands, modes and activation programs.

/// ADIF band enumeration, lowercase.
pub const BANDS: &[&str] = &[
    "2190m", "630m", "560m", "160m", "80m", "60m", "40m", "30m", "20m", "17m", "15m", "12m",
    "10m", "8m", "6m", "5m", "4m", "2m", "1.25m", "70cm", "33cm", "23cm", "13cm", "9cm", "6cm",
    "3cm", "1.25cm", "6mm", "4mm", "2.5mm", "2mm", "1mm", "submm",
];

/// Legacy numeric band shortcuts.
pub const BAND_ALIASES: &[(&str, &str)] = &[
    ("0", "160m"),
    ("1", "10m"),
    ("2", "20m"),
    ("3", "30m"),
    ("4", "40m"),
    ("5", "15m"),
    ("6", "12m"),
    ("7", "17m"),
    ("8", "80m"),
    ("9", "60m"),
    ("-2", "2m"),
    ("-4", "4m"),
    ("-5", "6m"),
    ("-6", "60m"),
    ("-7", "70cm"),
];

/// ADIF primary mode enumeration.
pub const MODES: &[&str] = &[
    "AM", "ARDOP", "ATV", "CHIP", "CLO", "CONTESTI", "CW", "DIGITALVOICE", "DOMINO", "DYNAMIC",
    "FAX", "FM", "FSK441", "FT8", "HELL", "ISCAT", "JT4", "JT6M", "JT9", "JT44", "JT65", "MFSK",
    "MSK144", "MT63", "OLIVIA", "OPERA", "PAC", "PAX", "PKT", "PSK", "PSK2K", "Q15", "QRA64",
    "ROS", "RTTY", "RTTYM", "SSB", "SSTV", "T10", "THOR", "THRB", "TOR", "V4", "VOI", "WINMOR",
    "WSPR",
];

/// Legacy one- and two-letter mode shortcuts.
pub const MODE_ALIASES: &[(&str, &str)] = &[
    ("S", "SSB"),
    ("C", "CW"),
    ("R", "RTTY"),
    ("A", "AMTOR"),
    ("D", "MFSK"),
    ("F", "FM"),
    ("H", "HELL"),
    ("J", "JT65"),
    ("P", "PSK"),
    ("T", "FT8"),
    ("M", "MFSK"),
    ("DV", "DIGITALVOICE"),
];

/// Activation programs that use `MY_SIG`/`SIG_INFO` instead of contest serials.
pub const SIGNATURE_PROGRAMS: &[&str] = &["POTA", "SOTA"];

/// Looks up a band code such as `20m` or `70CM`.
pub fn lookup_band(token: &str) -> Option<&'static str> {
    let lower = token.to_ascii_lowercase();
    if !lower.ends_with('m') {
        return None;
    }
    BANDS.iter().copied().find(|b| *b == lower)
}

/// Looks up a legacy numeric band shortcut.
pub fn band_alias(token: &str) -> Option<&'static str> {
    BAND_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, band)| *band)
}

/// Resolves a mode name or legacy alias to its canonical ADIF name.
pub fn lookup_mode(token: &str) -> Option<&'static str> {
    let upper = token.to_ascii_uppercase();
    MODES
        .iter()
        .copied()
        .find(|m| *m == upper)
        .or_else(|| {
            MODE_ALIASES
                .iter()
                .find(|(alias, _)| *alias == upper)
                .map(|(_, mode)| *mode)
        })
}

/// Conventional signal report for a mode, if the mode has one.
pub fn default_rst(mode: &str) -> Option<&'static str> {
    match mode {
        "CW" => Some("599"),
        "AM" | "FM" | "SSB" | "DIGITALVOICE" => Some("59"),
        _ => None,
    }
}

/// True when `event` names a signature program rather than a contest.
pub fn is_signature_program(event: &str) -> bool {
    SIGNATURE_PROGRAMS.contains(&event)
}
