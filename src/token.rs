//! Token classification.
//!
//! [`classify`] maps a finished token to exactly one [`TokenKind`]; the
//! evaluator then applies it. Precedence is the order of the checks below.

use crate::{
    types::{band_alias, lookup_band, lookup_mode},
    validate::{is_decimal, is_shortcut_number},
};

/// What a token means, with the payload still raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// Known band code or legacy shortcut, canonical form.
    Band(&'static str),
    /// Numeric shortcut with no band behind it.
    IgnoredShortcut,
    /// `<digits>d`
    Date(&'a str),
    /// `<digits>t`
    Time(&'a str),
    /// `<kHz>f`
    Frequency(&'a str),
    /// `<value>p`
    Power(&'a str),
    /// Number followed by an unrecognized suffix.
    UnknownNumber,
    /// Canonical mode name.
    Mode(&'static str),
    /// `#text`, empty to clear.
    Comment(&'a str),
    /// `'text`, empty to clear.
    Name(&'a str),
    /// `@grid` or `@Name(grid)`, empty to clear.
    Locator(&'a str),
    /// `$ID`, empty to deactivate.
    Event(&'a str),
    /// `%exchange`
    Exchange(&'a str),
    /// `.rst`
    RstReceived(&'a str),
    /// `,rst`
    RstSent(&'a str),
    /// `*`
    QslToggle,
    /// `=`
    SyncNow,
    /// `-` commands.
    Extended(Extended<'a>),
    /// Anything else.
    Callsign(&'a str),
}

/// Dash-prefixed station commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extended<'a> {
    /// `-c<call>`
    OwnCall(&'a str),
    /// `-l[<grid>]`
    OwnLocator(&'a str),
    /// `-n[<name>]`
    OwnName(&'a str),
    /// `-N<exchange>`
    OwnExchange(&'a str),
    /// `-V`
    Version,
    /// Any other dash command.
    Unknown,
}

/// Classifies a non-empty token.
pub fn classify(token: &str) -> TokenKind<'_> {
    if let Some(band) = lookup_band(token) {
        return TokenKind::Band(band);
    }
    if is_shortcut_number(token) {
        return match band_alias(token) {
            Some(band) => TokenKind::Band(band),
            None => TokenKind::IgnoredShortcut,
        };
    }
    if let Some(kind) = classify_numeric(token) {
        return kind;
    }
    if let Some(mode) = lookup_mode(token) {
        return TokenKind::Mode(mode);
    }

    if let Some(rest) = token.strip_prefix('#') {
        TokenKind::Comment(rest)
    } else if let Some(rest) = token.strip_prefix('\'') {
        TokenKind::Name(rest)
    } else if let Some(rest) = token.strip_prefix('@') {
        TokenKind::Locator(rest)
    } else if let Some(rest) = token.strip_prefix('$') {
        TokenKind::Event(rest)
    } else if let Some(rest) = token.strip_prefix('%') {
        TokenKind::Exchange(rest)
    } else if let Some(rest) = token.strip_prefix('.') {
        TokenKind::RstReceived(rest)
    } else if let Some(rest) = token.strip_prefix(',') {
        TokenKind::RstSent(rest)
    } else if token == "*" {
        TokenKind::QslToggle
    } else if token == "=" {
        TokenKind::SyncNow
    } else if let Some(rest) = token.strip_prefix('-') {
        TokenKind::Extended(classify_extended(rest))
    } else {
        TokenKind::Callsign(token)
    }
}

fn classify_numeric(token: &str) -> Option<TokenKind<'_>> {
    let mut chars = token.chars();
    let suffix = chars.next_back()?;
    let value = chars.as_str();
    if !is_decimal(value) {
        return None;
    }
    Some(match suffix {
        'd' => TokenKind::Date(value),
        't' => TokenKind::Time(value),
        'f' => TokenKind::Frequency(value),
        'p' => TokenKind::Power(value),
        _ => TokenKind::UnknownNumber,
    })
}

fn classify_extended(rest: &str) -> Extended<'_> {
    if rest == "V" {
        Extended::Version
    } else if let Some(v) = rest.strip_prefix('c') {
        Extended::OwnCall(v)
    } else if let Some(v) = rest.strip_prefix('l') {
        Extended::OwnLocator(v)
    } else if let Some(v) = rest.strip_prefix('n') {
        Extended::OwnName(v)
    } else if let Some(v) = rest.strip_prefix('N') {
        Extended::OwnExchange(v)
    } else {
        Extended::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_before_numbers() {
        assert_eq!(classify("20m"), TokenKind::Band("20m"));
        assert_eq!(classify("40M"), TokenKind::Band("40m"));
        assert_eq!(classify("8"), TokenKind::Band("80m"));
        assert_eq!(classify("-4"), TokenKind::Band("4m"));
        assert_eq!(classify("12"), TokenKind::IgnoredShortcut);
        assert_eq!(classify("-"), TokenKind::IgnoredShortcut);
    }

    #[test]
    fn numeric_suffixes() {
        assert_eq!(classify("20221015d"), TokenKind::Date("20221015"));
        assert_eq!(classify("45t"), TokenKind::Time("45"));
        assert_eq!(classify("145312.5f"), TokenKind::Frequency("145312.5"));
        assert_eq!(classify("12p"), TokenKind::Power("12"));
        assert_eq!(classify("1o"), TokenKind::UnknownNumber);
        assert_eq!(classify("123"), TokenKind::UnknownNumber);
    }

    #[test]
    fn modes_and_prefixes() {
        assert_eq!(classify("ssb"), TokenKind::Mode("SSB"));
        assert_eq!(classify("C"), TokenKind::Mode("CW"));
        assert_eq!(classify("#Nice_QSO"), TokenKind::Comment("Nice_QSO"));
        assert_eq!(classify("'"), TokenKind::Name(""));
        assert_eq!(classify("@JO30uj"), TokenKind::Locator("JO30uj"));
        assert_eq!(classify("$"), TokenKind::Event(""));
        assert_eq!(classify("%12"), TokenKind::Exchange("12"));
        assert_eq!(classify(".57"), TokenKind::RstReceived("57"));
        assert_eq!(classify(",57"), TokenKind::RstSent("57"));
        assert_eq!(classify("*"), TokenKind::QslToggle);
        assert_eq!(classify("="), TokenKind::SyncNow);
    }

    #[test]
    fn extended_commands() {
        assert_eq!(classify("-cDL1ABC"), TokenKind::Extended(Extended::OwnCall("DL1ABC")));
        assert_eq!(classify("-l"), TokenKind::Extended(Extended::OwnLocator("")));
        assert_eq!(classify("-nJo"), TokenKind::Extended(Extended::OwnName("Jo")));
        assert_eq!(classify("-N5"), TokenKind::Extended(Extended::OwnExchange("5")));
        assert_eq!(classify("-V"), TokenKind::Extended(Extended::Version));
        assert_eq!(classify("-x"), TokenKind::Extended(Extended::Unknown));
    }

    #[test]
    fn everything_else_is_a_callsign() {
        assert_eq!(classify("dl1abc"), TokenKind::Callsign("dl1abc"));
        assert_eq!(classify("*x"), TokenKind::Callsign("*x"));
    }
}
