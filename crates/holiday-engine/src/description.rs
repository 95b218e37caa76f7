//! Description parsing: one holiday's free-text arrangement → day records.
//!
//! A description is split into sentences on `，`, `。` and `；`. Every
//! sentence runs through all rest-day rules against one shared
//! [`ParseContext`], so month elision and deduplication work across the
//! whole description but never leak into another one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resolver::ParseContext;
use crate::sentence::match_sentence;

const SENTENCE_DELIMITERS: [char; 3] = ['，', '。', '；'];

/// One dated entry of a holiday arrangement.
///
/// Serializes as `{"name": "春节", "date": "2025-01-28", "isOffDay": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// The holiday this date belongs to.
    pub name: String,
    pub date: NaiveDate,
    /// `true` for a day off, `false` for a compensatory workday.
    pub is_off_day: bool,
}

impl DayRecord {
    pub fn new(name: impl Into<String>, date: NaiveDate, is_off_day: bool) -> Self {
        Self {
            name: name.into(),
            date,
            is_off_day,
        }
    }
}

/// Parse one holiday description into day records.
///
/// Records come out in sentence order, then rule order (off-day, workday,
/// swap), then match order. A date already produced earlier in the same
/// description is not produced again, even by a different rule.
///
/// # Errors
///
/// Any [`crate::HolidayError`] raised while resolving a date aborts the whole
/// description.
///
/// # Examples
///
/// ```
/// use holiday_engine::parse_description;
///
/// let days = parse_description("元旦", "1月1日放假，2日补休", 2024).unwrap();
/// assert_eq!(days.len(), 2);
/// assert_eq!(days[1].date.to_string(), "2024-01-02");
/// assert!(days.iter().all(|d| d.is_off_day && d.name == "元旦"));
/// ```
pub fn parse_description(
    name: &str,
    description: &str,
    reference_year: i32,
) -> Result<Vec<DayRecord>> {
    let mut ctx = ParseContext::new(name, reference_year);
    let mut records = Vec::new();

    for sentence in description.split(SENTENCE_DELIMITERS) {
        for day in match_sentence(sentence, &mut ctx)? {
            records.push(DayRecord::new(ctx.name(), day.date, day.is_off_day));
        }
    }

    log::debug!(
        "{name} ({reference_year}): {} record(s) from '{description}'",
        records.len()
    );
    Ok(records)
}
