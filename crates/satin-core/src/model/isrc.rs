use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters in a compact ISRC.
pub const ISRC_LEN: usize = 12;

/// The checks applied when parsing an ISRC.
///
/// Length, country prefix, and alphanumeric body are always checked; the
/// segment rules below are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRules {
    /// The year segment (characters 6-7) must be two ASCII digits.
    pub require_numeric_year: bool,

    /// The designation (characters 8-12) must be five ASCII digits.
    pub require_numeric_designation: bool,
}

impl Default for FormatRules {
    fn default() -> Self {
        Self {
            require_numeric_year: true,
            require_numeric_designation: false,
        }
    }
}

impl FormatRules {
    /// Only the base invariants: length, country prefix, alphanumeric body.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            require_numeric_year: false,
            require_numeric_designation: false,
        }
    }

    /// Every segment rule enabled.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            require_numeric_year: true,
            require_numeric_designation: true,
        }
    }
}

/// The first check an ISRC candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatViolation {
    /// Not exactly 12 characters.
    Length { actual: usize },
    /// The first two characters are not both alphabetic.
    CountryCode,
    /// A character after the country prefix is not alphanumeric (0-based).
    NonAlphanumeric { position: usize },
    /// The year segment is not two digits.
    Year,
    /// The designation code is not five digits.
    Designation,
}

impl fmt::Display for FormatViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { actual } => write!(f, "expected {ISRC_LEN} characters, found {actual}"),
            Self::CountryCode => write!(f, "country code must be two letters"),
            Self::NonAlphanumeric { position } => {
                write!(f, "non-alphanumeric character at position {}", position + 1)
            }
            Self::Year => write!(f, "year segment must be two digits"),
            Self::Designation => write!(f, "designation code must be five digits"),
        }
    }
}

impl std::error::Error for FormatViolation {}

/// A syntactically valid International Standard Recording Code.
///
/// Stored in compact form (`CCXXXYYNNNNN`) exactly as written in the
/// dataset; case is preserved. Every instance has passed at least the base
/// invariants, so segment accessors never panic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isrc(String);

impl Isrc {
    /// Parse a candidate against the given rules.
    ///
    /// Surrounding whitespace is stripped first; nothing else is normalised.
    pub fn parse(raw: &str, rules: FormatRules) -> Result<Self, FormatViolation> {
        let candidate = raw.trim();

        // Count chars, not bytes, so multi-byte input reports a sensible length.
        let len = candidate.chars().count();
        if len != ISRC_LEN {
            return Err(FormatViolation::Length { actual: len });
        }

        let bytes = candidate.as_bytes();
        if bytes.len() != ISRC_LEN {
            // Right char count, but some of them are multi-byte.
            let position = candidate
                .chars()
                .position(|c| !c.is_ascii())
                .unwrap_or_default();
            return if position < 2 {
                Err(FormatViolation::CountryCode)
            } else {
                Err(FormatViolation::NonAlphanumeric { position })
            };
        }

        if !bytes[..2].iter().all(u8::is_ascii_alphabetic) {
            return Err(FormatViolation::CountryCode);
        }

        if let Some(offset) = bytes[2..].iter().position(|b| !b.is_ascii_alphanumeric()) {
            return Err(FormatViolation::NonAlphanumeric {
                position: offset + 2,
            });
        }

        if rules.require_numeric_year && !bytes[5..7].iter().all(u8::is_ascii_digit) {
            return Err(FormatViolation::Year);
        }

        if rules.require_numeric_designation && !bytes[7..].iter().all(u8::is_ascii_digit) {
            return Err(FormatViolation::Designation);
        }

        Ok(Self(candidate.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-letter country prefix, as written.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.0[..2]
    }

    /// The three-character registrant code.
    #[must_use]
    pub fn registrant(&self) -> &str {
        &self.0[2..5]
    }

    /// The raw two-character year segment.
    #[must_use]
    pub fn year(&self) -> &str {
        &self.0[5..7]
    }

    /// The year segment as a number, if it is two digits.
    #[must_use]
    pub fn year_number(&self) -> Option<u8> {
        let year = self.year();
        if year.bytes().all(|b| b.is_ascii_digit()) {
            year.parse().ok()
        } else {
            None
        }
    }

    /// The five-character designation code.
    #[must_use]
    pub fn designation(&self) -> &str {
        &self.0[7..]
    }

    /// Render as `CC-XXX-YY-NNNNN`.
    #[must_use]
    pub fn hyphenated(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.country(),
            self.registrant(),
            self.year(),
            self.designation()
        )
    }
}

impl fmt::Display for Isrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Isrc {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Isrc {
    type Err = FormatViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, FormatRules::default())
    }
}

/// Expand a two-digit ISRC year relative to `reference_year`.
///
/// Years that would land after the reference year belong to the previous
/// century, so `99` becomes 1999 and `12` becomes 2012 for any reference
/// year from 2012 to 2099.
#[must_use]
pub fn expand_year(two_digit: u8, reference_year: i32) -> i32 {
    let candidate = 2000 + i32::from(two_digit);
    if candidate > reference_year {
        candidate - 100
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_isrc() {
        let isrc = Isrc::parse("USWB11200587", FormatRules::default()).unwrap();
        assert_eq!(isrc.as_str(), "USWB11200587");
        assert_eq!(isrc.country(), "US");
        assert_eq!(isrc.registrant(), "WB1");
        assert_eq!(isrc.year(), "12");
        assert_eq!(isrc.year_number(), Some(12));
        assert_eq!(isrc.designation(), "00587");
    }

    #[test]
    fn test_parse_strips_whitespace() {
        let isrc = Isrc::parse("  FRX123456789\n", FormatRules::default()).unwrap();
        assert_eq!(isrc.as_str(), "FRX123456789");
    }

    #[test]
    fn test_parse_preserves_case() {
        let isrc = Isrc::parse("usWB11200587", FormatRules::default()).unwrap();
        assert_eq!(isrc.country(), "us");
    }

    #[test]
    fn test_parse_wrong_length() {
        for raw in ["", "XX1", "USWB1120058", "USWB112005870"] {
            let err = Isrc::parse(raw, FormatRules::default()).unwrap_err();
            assert_eq!(
                err,
                FormatViolation::Length {
                    actual: raw.chars().count()
                },
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_parse_bad_country_code() {
        assert_eq!(
            Isrc::parse("1SWB11200587", FormatRules::default()),
            Err(FormatViolation::CountryCode)
        );
        assert_eq!(
            Isrc::parse("U1WB11200587", FormatRules::default()),
            Err(FormatViolation::CountryCode)
        );
    }

    #[test]
    fn test_parse_non_alphanumeric_body() {
        assert_eq!(
            Isrc::parse("US-WB1120058", FormatRules::default()),
            Err(FormatViolation::NonAlphanumeric { position: 2 })
        );
    }

    #[test]
    fn test_parse_multibyte_reports_position() {
        assert_eq!(
            Isrc::parse("USWB1120058é", FormatRules::default()),
            Err(FormatViolation::NonAlphanumeric { position: 11 })
        );
        assert_eq!(
            Isrc::parse("ÜSWB11200587", FormatRules::default()),
            Err(FormatViolation::CountryCode)
        );
    }

    #[test]
    fn test_year_rule() {
        assert_eq!(
            Isrc::parse("USWB1AB00587", FormatRules::default()),
            Err(FormatViolation::Year)
        );

        let lenient = Isrc::parse("USWB1AB00587", FormatRules::lenient()).unwrap();
        assert_eq!(lenient.year(), "AB");
        assert_eq!(lenient.year_number(), None);
    }

    #[test]
    fn test_designation_rule() {
        assert!(Isrc::parse("USWB112ABCDE", FormatRules::default()).is_ok());
        assert_eq!(
            Isrc::parse("USWB112ABCDE", FormatRules::strict()),
            Err(FormatViolation::Designation)
        );
    }

    #[test]
    fn test_hyphenated() {
        let isrc: Isrc = "USWB11200587".parse().unwrap();
        assert_eq!(isrc.hyphenated(), "US-WB1-12-00587");
        assert_eq!(isrc.to_string(), "USWB11200587");
    }

    #[test]
    fn test_expand_year() {
        assert_eq!(expand_year(12, 2017), 2012);
        assert_eq!(expand_year(17, 2017), 2017);
        assert_eq!(expand_year(18, 2017), 1918);
        assert_eq!(expand_year(99, 2026), 1999);
        assert_eq!(expand_year(0, 2026), 2000);
    }

    #[test]
    fn test_violation_display() {
        let msg = FormatViolation::Length { actual: 3 }.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains('3'));
    }
}
