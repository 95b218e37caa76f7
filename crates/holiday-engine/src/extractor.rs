//! Date list extraction from a date-bearing fragment of a sentence.
//!
//! Three strategies run over the same text, in a fixed order:
//!
//! 1. **Singles** — every `[Y年][M月]D日`.
//! 2. **Ranges** — `A至B`, `A-B` or `A—B`, expanded day by day.
//! 3. **Lists** — `A、B、C`, each item resolved on its own.
//!
//! All of them resolve through [`crate::resolver`] and record new dates in
//! the shared [`ParseContext`], so a date claimed by an earlier strategy (or
//! an earlier sentence of the same description) is not produced again. The
//! order is observable: it decides which strategy claims a date and thereby
//! the order of the output.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{HolidayError, Result};
use crate::resolver::{DateFragment, ParseContext};

static SINGLE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:([0-9]+)年)?(?:([0-9]+)月)?([0-9]+)日").expect("valid date pattern")
});

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:([0-9]+)年)?(?:([0-9]+)月)?([0-9]+)日[至\-—](?:([0-9]+)年)?(?:([0-9]+)月)?([0-9]+)日",
    )
    .expect("valid range pattern")
});

static DATE_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:[0-9]+年)?(?:[0-9]+月)?[0-9]+日(?:（[^）]+）)?(?:、(?:[0-9]+年)?(?:[0-9]+月)?[0-9]+日(?:（[^）]+）)?)+",
    )
    .expect("valid list pattern")
});

/// Parenthesized remarks such as weekday names: `（星期六）`, `（农历除夕、周二）`.
static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"（.+?）").expect("valid annotation pattern"));

type Strategy = fn(&str, &mut ParseContext) -> Result<Vec<NaiveDate>>;

const STRATEGIES: [(&str, Strategy); 3] = [
    ("singles", extract_singles),
    ("ranges", extract_ranges),
    ("lists", extract_lists),
];

/// Extract every date mentioned in `text`, in first-seen order and without
/// duplicates.
///
/// Dates already in `ctx`'s history are skipped, with one exception carried
/// by the range strategy: the start of a range is always emitted.
///
/// # Errors
///
/// Propagates resolver errors; nothing is returned for a fragment containing
/// an unresolvable date.
///
/// # Examples
///
/// ```
/// use holiday_engine::extractor::extract_dates;
/// use holiday_engine::resolver::ParseContext;
///
/// let mut ctx = ParseContext::new("国庆节", 2024);
/// let dates = extract_dates("10月1日至3日", &mut ctx).unwrap();
/// let dates: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
/// assert_eq!(dates, ["2024-10-01", "2024-10-03", "2024-10-02"]);
/// ```
pub fn extract_dates(text: &str, ctx: &mut ParseContext) -> Result<Vec<NaiveDate>> {
    let text = normalize_parentheses(text);

    let mut dates = Vec::new();
    for (label, strategy) in STRATEGIES {
        let found = strategy(&text, ctx)?;
        if !found.is_empty() {
            log::trace!("{label} in '{text}': {found:?}");
        }
        dates.extend(found);
    }

    let mut seen = HashSet::new();
    dates.retain(|date| seen.insert(*date));
    Ok(dates)
}

fn normalize_parentheses(text: &str) -> String {
    text.replace('(', "（").replace(')', "）")
}

fn strip_annotations(text: &str) -> String {
    ANNOTATION.replace_all(text, "").into_owned()
}

fn extract_singles(text: &str, ctx: &mut ParseContext) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    for caps in SINGLE_DATE.captures_iter(text) {
        let date = DateFragment::from_captures(&caps, 0).resolve(ctx)?;
        if ctx.record(date) {
            dates.push(date);
        }
    }
    Ok(dates)
}

fn extract_ranges(text: &str, ctx: &mut ParseContext) -> Result<Vec<NaiveDate>> {
    let text = strip_annotations(text);
    let mut dates = Vec::new();
    for caps in DATE_RANGE.captures_iter(&text) {
        let start = DateFragment::from_captures(&caps, 0).resolve(ctx)?;
        let end = DateFragment::from_captures(&caps, 3).resolve(ctx)?;
        dates.push(start);

        let mut day = start;
        while day < end {
            day = day.succ_opt().ok_or_else(|| {
                HolidayError::InvalidDate(format!("no day after {day} in '{text}'"))
            })?;
            if ctx.record(day) {
                dates.push(day);
            }
        }
    }
    Ok(dates)
}

fn extract_lists(text: &str, ctx: &mut ParseContext) -> Result<Vec<NaiveDate>> {
    let text = strip_annotations(text);
    let mut dates = Vec::new();
    for list in DATE_LIST.find_iter(&text) {
        for caps in SINGLE_DATE.captures_iter(list.as_str()) {
            let date = DateFragment::from_captures(&caps, 0).resolve(ctx)?;
            if ctx.record(date) {
                dates.push(date);
            }
        }
    }
    Ok(dates)
}

// ── Tests ───────────────────────────────────────────────────────────────────
