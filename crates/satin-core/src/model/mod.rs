pub mod isrc;
pub mod record;

pub use isrc::{expand_year, FormatRules, FormatViolation, Isrc, ISRC_LEN};
pub use record::{Classification, DatasetRecord, Validity};
