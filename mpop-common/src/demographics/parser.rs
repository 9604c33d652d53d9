//! Parser for UN Data Portal pipe-delimited responses
//!
//! One response body holds the rows for a single (location, indicator, year)
//! request. Rows are positional; only rows computed with the "Median"
//! estimation method are kept.

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{RawFact, Sex, Year};

// ============================================================================
// Upstream column layout
// ============================================================================
//
// Positions assume the UN Data Portal API v1 `format=csv` export
// (`sep=|` header row followed by 0-indexed positional columns):
//   12 variant label, 16 time label, 25 sex, 27 age label, 31 value.
// A schema change upstream shifts these silently: numeric columns that stop
// parsing are skipped row by row, and text columns are not validated.

/// Leading token of the separator declaration row (`sep=|`)
pub const SEPARATOR_DECLARATION: &str = "sep";

/// Field separator within a row
pub const FIELD_SEPARATOR: char = '|';

/// Estimation method ("variant") column
pub const METHOD_FIELD: usize = 12;

/// Year column, may be quoted and fractional
pub const YEAR_FIELD: usize = 16;

/// Sex label column
pub const SEX_FIELD: usize = 25;

/// Fine age bracket column
pub const AGE_FIELD: usize = 27;

/// Population count column, may be quoted and fractional
pub const VALUE_FIELD: usize = 31;

/// Rows with fewer fields cannot carry every column above
pub const MIN_FIELD_COUNT: usize = VALUE_FIELD + 1;

/// The only estimation method kept
pub const MEDIAN_METHOD: &str = "Median";

/// Reason a single data row was skipped
#[derive(Debug, Error, PartialEq)]
pub enum MalformedLine {
    #[error("row has {0} fields, expected at least {}", MIN_FIELD_COUNT)]
    TooShort(usize),

    #[error("unrecognized sex label {0:?}")]
    UnknownSex(String),

    #[error("invalid {field} value {value:?}")]
    BadNumber { field: &'static str, value: String },
}

/// Result of parsing one response body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedResponse {
    /// Year carried by the qualifying rows, `None` when no row qualified
    pub year: Option<Year>,
    pub facts: Vec<RawFact>,
}

impl ParsedResponse {
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Parse one response body into raw facts
///
/// Never fails: malformed rows are logged and skipped, filtered rows are
/// dropped silently. `country` only tags log output.
pub fn parse(raw_text: &str, country: &str) -> ParsedResponse {
    let mut parsed = ParsedResponse::default();
    let mut skipped = 0usize;

    for (line_no, line) in raw_text.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with(SEPARATOR_DECLARATION) {
            continue;
        }

        match parse_row(line) {
            Ok(Some(fact)) => {
                if let Some(year) = parsed.year {
                    if year != fact.year {
                        warn!(
                            country = %country,
                            expected = year,
                            found = fact.year,
                            "Response mixes years, keeping the latest row's year"
                        );
                    }
                }
                parsed.year = Some(fact.year);
                parsed.facts.push(fact);
            }
            Ok(None) => {}
            Err(e) => {
                skipped += 1;
                debug!(country = %country, line = line_no + 1, error = %e, "Skipping row");
            }
        }
    }

    debug!(
        country = %country,
        year = ?parsed.year,
        facts = parsed.facts.len(),
        skipped,
        "Parsed demographic response"
    );

    parsed
}

/// Parse a single data row
///
/// `Ok(None)` means the row is well formed but not a Median row.
pub fn parse_row(line: &str) -> Result<Option<RawFact>, MalformedLine> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < MIN_FIELD_COUNT {
        return Err(MalformedLine::TooShort(fields.len()));
    }

    if fields[METHOD_FIELD] != MEDIAN_METHOD {
        return Ok(None);
    }

    let sex_label = fields[SEX_FIELD].trim();
    let sex = Sex::from_label(sex_label)
        .ok_or_else(|| MalformedLine::UnknownSex(sex_label.to_string()))?;
    let age_bracket = fields[AGE_FIELD].trim().to_string();

    let count = parse_number(fields[VALUE_FIELD])
        .filter(|v| *v >= 0)
        .ok_or_else(|| MalformedLine::BadNumber {
            field: "value",
            value: fields[VALUE_FIELD].to_string(),
        })? as u64;

    let year = parse_number(fields[YEAR_FIELD])
        .and_then(|v| Year::try_from(v).ok())
        .ok_or_else(|| MalformedLine::BadNumber {
            field: "year",
            value: fields[YEAR_FIELD].to_string(),
        })?;

    Ok(Some(RawFact {
        age_bracket,
        sex,
        count,
        year,
    }))
}

/// Parse a possibly quoted, possibly fractional number, truncating toward zero
fn parse_number(field: &str) -> Option<i64> {
    let cleaned = field.trim().replace('"', "");
    let value: f64 = cleaned.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}


#[cfg(test)]
mod tests {
    use super::test_rows::*;
    use super::*;

    #[test]
    fn test_parse_median_rows() {
        let text = body(&[
            median("Male", "0-4", "120.0", "2000"),
            median("Both sexes", "0-4", "250", "2000"),
        ]);
        let parsed = parse(&text, "246");

        assert_eq!(parsed.year, Some(2000));
        assert_eq!(parsed.facts.len(), 2);
        assert_eq!(parsed.facts[0].sex, Sex::Male);
        assert_eq!(parsed.facts[0].count, 120);
        assert_eq!(parsed.facts[1].sex, Sex::Both);
        assert_eq!(parsed.facts[1].age_bracket, "0-4");
    }

    #[test]
    fn test_non_median_rows_filtered() {
        let text = body(&[
            row("Lower 95 PI", "2000", "Male", "0-4", "100"),
            row("Upper 80 PI", "2000", "Both sexes", "0-4", "300"),
        ]);
        let parsed = parse(&text, "246");
        assert!(parsed.is_empty());
        assert_eq!(parsed.year, None);
    }

    #[test]
    fn test_quoted_number_matches_unquoted() {
        let quoted = parse_row(&median("Female", "5-9", "\"1234.0\"", "\"2010\"")).unwrap();
        let plain = parse_row(&median("Female", "5-9", "1234.0", "2010")).unwrap();
        assert_eq!(quoted, plain);
        assert_eq!(quoted.unwrap().count, 1234);
    }

    #[test]
    fn test_fractional_values_truncate() {
        let fact = parse_row(&median("Male", "10-14", "99.99", "2005.7"))
            .unwrap()
            .unwrap();
        assert_eq!(fact.count, 99);
        assert_eq!(fact.year, 2005);
    }

    #[test]
    fn test_labels_are_trimmed() {
        let fact = parse_row(&median("  Both sexes ", " 100+ ", "7", "2000"))
            .unwrap()
            .unwrap();
        assert_eq!(fact.sex, Sex::Both);
        assert_eq!(fact.age_bracket, "100+");
    }

    #[test]
    fn test_bad_count_skips_only_that_row() {
        let text = body(&[
            median("Male", "0-4", "n/a", "2000"),
            median("Female", "0-4", "80", "2000"),
        ]);
        let parsed = parse(&text, "246");
        assert_eq!(parsed.facts.len(), 1);
        assert_eq!(parsed.facts[0].sex, Sex::Female);
    }

    #[test]
    fn test_bad_year_is_malformed() {
        let err = parse_row(&median("Male", "0-4", "10", "")).unwrap_err();
        assert!(matches!(err, MalformedLine::BadNumber { field: "year", .. }));
    }

    #[test]
    fn test_negative_count_is_malformed() {
        let err = parse_row(&median("Male", "0-4", "-3", "2000")).unwrap_err();
        assert!(matches!(err, MalformedLine::BadNumber { field: "value", .. }));
    }

    #[test]
    fn test_non_finite_count_is_malformed() {
        assert!(parse_row(&median("Male", "0-4", "NaN", "2000")).is_err());
        assert!(parse_row(&median("Male", "0-4", "inf", "2000")).is_err());
    }

    #[test]
    fn test_short_rows_skipped() {
        assert_eq!(parse_row("a|b|c"), Err(MalformedLine::TooShort(3)));

        let text = format!("sep=|\na|b|c\n\n{}\n", median("Male", "0-4", "5", "2001"));
        let parsed = parse(&text, "246");
        assert_eq!(parsed.facts.len(), 1);
        assert_eq!(parsed.year, Some(2001));
    }

    #[test]
    fn test_unknown_sex_skipped() {
        let err = parse_row(&median("Other", "0-4", "5", "2001")).unwrap_err();
        assert_eq!(err, MalformedLine::UnknownSex("Other".to_string()));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = format!(
            "sep=|\r\n{}\r\n{}\r\n",
            median("Male", "0-4", "1", "1999"),
            median("Both sexes", "0-4", "2", "1999")
        );
        let parsed = parse(&text, "246");
        assert_eq!(parsed.facts.len(), 2);
        assert_eq!(parsed.facts[1].count, 2);
    }

    #[test]
    fn test_empty_body() {
        assert!(parse("", "246").is_empty());
        assert!(parse("sep=|\n", "246").is_empty());
    }
}
