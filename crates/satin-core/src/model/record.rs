use serde::{Deserialize, Serialize};

use crate::model::isrc::{FormatRules, FormatViolation, Isrc};

/// One row of a SATIN dataset file.
///
/// The ISRC sits in the first column; everything after it is carried as
/// positional metadata, with the genre tag in the last column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// 1-based line number in the source file.
    pub line: u64,

    /// The ISRC exactly as written, minus surrounding whitespace.
    pub isrc: String,

    /// Trailing metadata columns, in file order.
    pub fields: Vec<String>,
}

impl DatasetRecord {
    #[must_use]
    pub fn new(line: u64, isrc: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            line,
            isrc: isrc.into(),
            fields,
        }
    }

    /// The genre tag (last column), if the row has any trailing columns.
    #[must_use]
    pub fn genre(&self) -> Option<&str> {
        self.fields.last().map(String::as_str)
    }

    /// Validate the ISRC column against `rules`.
    pub fn parse_isrc(&self, rules: FormatRules) -> Result<Isrc, FormatViolation> {
        Isrc::parse(&self.isrc, rules)
    }
}

/// Outcome of validating a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    /// Well-formed, and present in the reference directory if one was given.
    Valid(Isrc),
    /// Failed a format check.
    InvalidFormat(FormatViolation),
    /// Well-formed, but the reference directory has no file for it.
    MissingFile(Isrc),
}

impl Validity {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Whether the ISRC passed the format checks, regardless of the
    /// reference directory.
    #[must_use]
    pub const fn is_format_valid(&self) -> bool {
        matches!(self, Self::Valid(_) | Self::MissingFile(_))
    }

    /// The parsed ISRC for format-valid records.
    #[must_use]
    pub const fn isrc(&self) -> Option<&Isrc> {
        match self {
            Self::Valid(isrc) | Self::MissingFile(isrc) => Some(isrc),
            Self::InvalidFormat(_) => None,
        }
    }

    /// Short label used in logs and summaries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Valid(_) => "valid",
            Self::InvalidFormat(_) => "invalid-format",
            Self::MissingFile(_) => "invalid-missing-file",
        }
    }
}

/// A dataset record paired with its validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub record: DatasetRecord,
    pub validity: Validity,
}

impl Classification {
    #[must_use]
    pub fn new(record: DatasetRecord, validity: Validity) -> Self {
        Self { record, validity }
    }

    /// Classify a record on format alone.
    #[must_use]
    pub fn from_format(record: DatasetRecord, rules: FormatRules) -> Self {
        let validity = match record.parse_isrc(rules) {
            Ok(isrc) => Validity::Valid(isrc),
            Err(violation) => Validity::InvalidFormat(violation),
        };
        Self { record, validity }
    }

    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        !self.validity.is_valid()
    }
}
