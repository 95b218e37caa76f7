//! Date expression resolution.
//!
//! Notices routinely leave out the year and month of a date whenever a
//! reader can recover them from what came before ("1月1日放假，2日补休").
//! The resolver turns one such partial expression into a concrete
//! [`NaiveDate`], using the dates already resolved in the same description
//! as its only context.
//!
//! # Inference rules
//!
//! - The day is mandatory.
//! - A missing month is the month of the most recently recorded date.
//! - A missing year is the reference year, except for December dates that
//!   trail a description whose dates all fall before February of the
//!   reference year: those belong to the previous year (a 2022 notice saying
//!   "12月31日上班" means 2021-12-31).

use chrono::{Datelike, NaiveDate};
use regex::Captures;

use crate::error::{HolidayError, Result};

// ── ParseContext ────────────────────────────────────────────────────────────

/// Per-description state shared by every resolution in one parse.
///
/// The history is insertion-ordered and never holds the same date twice.
/// It only grows: once a date is recorded, later fragments of the same
/// description never produce it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    name: String,
    reference_year: i32,
    history: Vec<NaiveDate>,
}

impl ParseContext {
    pub fn new(name: impl Into<String>, reference_year: i32) -> Self {
        Self {
            name: name.into(),
            reference_year,
            history: Vec::new(),
        }
    }

    /// The holiday label every record of this description carries.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Dates resolved so far, in the order they were recorded.
    pub fn history(&self) -> &[NaiveDate] {
        &self.history
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.history.contains(&date)
    }

    /// The most recently recorded date.
    pub fn last_recorded(&self) -> Option<NaiveDate> {
        self.history.last().copied()
    }

    /// The chronologically latest recorded date.
    pub fn latest(&self) -> Option<NaiveDate> {
        self.history.iter().max().copied()
    }

    /// Record `date`. Returns `false` (and leaves the history untouched) if it
    /// was already seen.
    pub fn record(&mut self, date: NaiveDate) -> bool {
        if self.contains(date) {
            return false;
        }
        self.history.push(date);
        true
    }
}

// ── DateFragment ────────────────────────────────────────────────────────────

/// The textual components of one `[Y年][M月]D日` expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFragment<'t> {
    pub year: Option<&'t str>,
    pub month: Option<&'t str>,
    pub day: Option<&'t str>,
}

impl<'t> DateFragment<'t> {
    pub fn new(year: Option<&'t str>, month: Option<&'t str>, day: Option<&'t str>) -> Self {
        Self { year, month, day }
    }

    /// Read capture groups `offset + 1..=offset + 3` as year, month and day.
    pub(crate) fn from_captures(caps: &Captures<'t>, offset: usize) -> Self {
        let group = |i: usize| caps.get(offset + i).map(|m| m.as_str());
        Self::new(group(1), group(2), group(3))
    }

    pub fn resolve(&self, ctx: &ParseContext) -> Result<NaiveDate> {
        resolve(self.year, self.month, self.day, ctx)
    }
}

// ── resolve ─────────────────────────────────────────────────────────────────

/// Resolve a possibly partial date expression against `ctx`.
///
/// Does not record the result; callers decide whether the date is new.
///
/// # Errors
///
/// - [`HolidayError::MissingDay`] if `day` is `None`.
/// - [`HolidayError::EmptyHistory`] if `month` is `None` and nothing has been
///   resolved yet.
/// - [`HolidayError::InvalidDate`] if a component is not a number or the
///   components do not form a calendar date.
///
/// # Examples
///
/// ```
/// use holiday_engine::resolver::{resolve, ParseContext};
///
/// let ctx = ParseContext::new("元旦", 2024);
/// let date = resolve(None, Some("1"), Some("1"), &ctx).unwrap();
/// assert_eq!(date.to_string(), "2024-01-01");
/// ```
pub fn resolve(
    year: Option<&str>,
    month: Option<&str>,
    day: Option<&str>,
    ctx: &ParseContext,
) -> Result<NaiveDate> {
    let day_text = day.ok_or_else(|| {
        HolidayError::MissingDay(format!(
            "year={:?} month={:?} in '{}'",
            year,
            month,
            ctx.name()
        ))
    })?;
    let day = parse_component(day_text, "day")?;

    let month = match month {
        Some(text) => parse_component(text, "month")?,
        None => ctx
            .last_recorded()
            .map(|date| date.month())
            .ok_or_else(|| {
                HolidayError::EmptyHistory(format!(
                    "cannot infer the month of day {} in '{}'",
                    day,
                    ctx.name()
                ))
            })?,
    };

    let year = match year {
        Some(text) => text
            .parse::<i32>()
            .map_err(|_| HolidayError::InvalidDate(format!("'{text}' is not a valid year")))?,
        None if month == 12 && belongs_to_previous_year(ctx) => ctx.reference_year() - 1,
        None => ctx.reference_year(),
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        HolidayError::InvalidDate(format!("{year}-{month:02}-{day:02} is not a calendar date"))
    })
}

/// A yearless December date belongs to the previous year when everything
/// seen so far lies before February 1 of the reference year.
fn belongs_to_previous_year(ctx: &ParseContext) -> bool {
    let Some(latest) = ctx.latest() else {
        return false;
    };
    NaiveDate::from_ymd_opt(ctx.reference_year(), 2, 1).is_some_and(|feb1| feb1 > latest)
}

fn parse_component(text: &str, unit: &str) -> Result<u32> {
    text.parse::<u32>()
        .map_err(|_| HolidayError::InvalidDate(format!("'{text}' is not a valid {unit}")))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx_with(year: i32, history: &[NaiveDate]) -> ParseContext {
        let mut ctx = ParseContext::new("test", year);
        for d in history {
            ctx.record(*d);
        }
        ctx
    }

    #[test]
    fn test_resolve_full_date() {
        let ctx = ParseContext::new("test", 2024);
        let d = resolve(Some("2023"), Some("12"), Some("30"), &ctx).unwrap();
        assert_eq!(d, date(2023, 12, 30));
    }

    #[test]
    fn test_resolve_defaults_year_to_reference() {
        let ctx = ParseContext::new("test", 2025);
        let d = resolve(None, Some("10"), Some("1"), &ctx).unwrap();
        assert_eq!(d, date(2025, 10, 1));
    }

    #[test]
    fn test_resolve_infers_month_from_last_recorded() {
        // Last recorded, not latest: history order matters.
        let ctx = ctx_with(2025, &[date(2025, 2, 4), date(2025, 1, 28)]);
        let d = resolve(None, None, Some("29"), &ctx).unwrap();
        assert_eq!(d, date(2025, 1, 29));
    }

    #[test]
    fn test_resolve_december_rolls_back_after_january_history() {
        let ctx = ctx_with(2022, &[date(2022, 1, 1), date(2022, 1, 3)]);
        let d = resolve(None, Some("12"), Some("31"), &ctx).unwrap();
        assert_eq!(d, date(2021, 12, 31));
    }

    #[test]
    fn test_resolve_december_stays_when_history_empty() {
        let ctx = ParseContext::new("test", 2022);
        let d = resolve(None, Some("12"), Some("31"), &ctx).unwrap();
        assert_eq!(d, date(2022, 12, 31));
    }

    #[test]
    fn test_resolve_december_stays_when_history_reaches_february() {
        let ctx = ctx_with(2022, &[date(2022, 2, 1)]);
        let d = resolve(None, Some("12"), Some("31"), &ctx).unwrap();
        assert_eq!(d, date(2022, 12, 31));
    }

    #[test]
    fn test_resolve_december_with_explicit_year_is_kept() {
        let ctx = ctx_with(2022, &[date(2022, 1, 1)]);
        let d = resolve(Some("2022"), Some("12"), Some("31"), &ctx).unwrap();
        assert_eq!(d, date(2022, 12, 31));
    }

    #[test]
    fn test_resolve_inferred_december_rolls_back() {
        let ctx = ctx_with(2024, &[date(2024, 1, 1), date(2023, 12, 30)]);
        let d = resolve(None, None, Some("31"), &ctx).unwrap();
        assert_eq!(d, date(2023, 12, 31));
    }

    #[test]
    fn test_resolve_missing_day() {
        let ctx = ParseContext::new("test", 2024);
        let err = resolve(None, Some("1"), None, &ctx).unwrap_err();
        assert!(matches!(err, HolidayError::MissingDay(_)), "got: {err}");
    }

    #[test]
    fn test_resolve_missing_month_without_history() {
        let ctx = ParseContext::new("test", 2024);
        let err = resolve(None, None, Some("2"), &ctx).unwrap_err();
        assert!(matches!(err, HolidayError::EmptyHistory(_)), "got: {err}");
    }

    #[test]
    fn test_resolve_invalid_calendar_date() {
        let ctx = ParseContext::new("test", 2024);
        let err = resolve(None, Some("4"), Some("31"), &ctx).unwrap_err();
        assert!(err.to_string().contains("Invalid date"), "got: {err}");
    }

    #[test]
    fn test_resolve_overflowing_number() {
        let ctx = ParseContext::new("test", 2024);
        let err = resolve(None, Some("1"), Some("99999999999"), &ctx).unwrap_err();
        assert!(matches!(err, HolidayError::InvalidDate(_)), "got: {err}");
    }

    #[test]
    fn test_context_record_skips_duplicates() {
        let mut ctx = ParseContext::new("test", 2024);
        assert!(ctx.record(date(2024, 5, 1)));
        assert!(!ctx.record(date(2024, 5, 1)));
        assert_eq!(ctx.history(), &[date(2024, 5, 1)]);
    }

    #[test]
    fn test_context_latest_vs_last_recorded() {
        let ctx = ctx_with(2024, &[date(2024, 2, 10), date(2024, 2, 4)]);
        assert_eq!(ctx.latest(), Some(date(2024, 2, 10)));
        assert_eq!(ctx.last_recorded(), Some(date(2024, 2, 4)));
    }
}
