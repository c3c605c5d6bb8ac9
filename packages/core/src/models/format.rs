//! Value Format Constants
//!
//! Date patterns used when dates travel as text, either inside an entity
//! (a date stored as a string attribute) or through the JSON mapper.
//!
//! Patterns use chrono's `strftime` syntax. The default pattern corresponds
//! to `yyyy-MM-dd HH:mm:ss.SSS`.
//!
//! # Examples
//!
//! ```rust
//! use dataobject_core::models::format::{format_date, parse_default_date};
//!
//! let date = parse_default_date("2017-11-30 17:29:12.583")?;
//! assert_eq!(format_date(&date, dataobject_core::models::format::DEFAULT_DATE_PATTERN), "2017-11-30 17:29:12.583");
//! # Ok::<(), chrono::ParseError>(())
//! ```

use chrono::{NaiveDate, NaiveDateTime};

/// Default date pattern, millisecond precision
pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Date-only pattern
pub const DATE_PATTERN: &str = "%Y-%m-%d";

/// Parse a date using the default pattern
pub fn parse_default_date(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    parse_date(text, DEFAULT_DATE_PATTERN)
}

/// Parse a date using an explicit pattern
///
/// Date-only patterns are accepted and resolve to midnight.
pub fn parse_date(text: &str, pattern: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match NaiveDateTime::parse_from_str(text, pattern) {
        Ok(date) => Ok(date),
        Err(err) => match NaiveDate::parse_from_str(text, pattern) {
            Ok(day) => Ok(day.and_time(chrono::NaiveTime::MIN)),
            Err(_) => Err(err),
        },
    }
}

/// Format a date using an explicit pattern
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> String {
    date.format(pattern).to_string()
}
