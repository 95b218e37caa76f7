//! Rule extraction from the body of a holiday notice.
//!
//! The input is the notice's plain text with one paragraph per line. Two
//! independent heuristics pick out `(holiday, description)` pairs:
//!
//! - **Normal rules** — numbered clauses of the yearly notice:
//!   `二、春节：1月28日至2月4日放假调休，共8天。`
//! - **Patch rules** — numbered clauses of a supplementary notice, named by a
//!   heading such as `关于调整2020年劳动节假期安排的通知` and kept only when
//!   they mention a `M月D日` date.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::description::{parse_description, DayRecord};
use crate::error::{HolidayError, Result};

static NORMAL_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[一二三四五六七八九十]、(.+?)[：:](.+)").expect("valid rule pattern")
});

static PATCH_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r".*[0-9]+年([^和、]{2,})(?:假期|放假).*安排").expect("valid heading pattern")
});

static PATCH_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[一二三四五六七八九十]、(.+)$").expect("valid clause pattern")
});

static MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+月[0-9]+日").expect("valid month-day pattern"));

/// One holiday arrangement clause of a notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    pub holiday_name: String,
    pub description: String,
}

impl PolicyRule {
    pub fn new(holiday_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            holiday_name: holiday_name.into(),
            description: description.into(),
        }
    }

    /// Parse this rule's description into day records for `year`.
    pub fn parse(&self, year: i32) -> Result<Vec<DayRecord>> {
        parse_description(&self.holiday_name, &self.description, year)
    }
}

/// Extract every rule from a notice body: normal rules first, then patch
/// rules, each in line order.
///
/// # Errors
///
/// Returns [`HolidayError::NoRules`] if neither heuristic finds anything.
pub fn extract_rules(paper: &str) -> Result<Vec<PolicyRule>> {
    let lines = unique_lines(paper);

    let mut rules = normal_rules(&lines);
    rules.extend(patch_rules(&lines));

    if rules.is_empty() {
        return Err(HolidayError::NoRules);
    }
    log::debug!("extracted {} rule(s)", rules.len());
    Ok(rules)
}

/// Trimmed lines, keeping only the first occurrence of a repeated line.
fn unique_lines(paper: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    paper
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| seen.insert(*line))
        .collect()
}

fn normal_rules(lines: &[&str]) -> Vec<PolicyRule> {
    lines
        .iter()
        .filter_map(|&line| NORMAL_RULE.captures(line))
        .map(|caps| PolicyRule::new(&caps[1], &caps[2]))
        .collect()
}

fn patch_rules(lines: &[&str]) -> Vec<PolicyRule> {
    let mut name: Option<&str> = None;
    let mut rules = Vec::new();

    for &line in lines {
        if let Some(caps) = PATCH_HEADING.captures(line) {
            name = caps.get(1).map(|m| m.as_str());
        }
        let Some(holiday) = name else {
            continue;
        };
        let Some(caps) = PATCH_CLAUSE.captures(line) else {
            continue;
        };
        let description = &caps[1];
        if MONTH_DAY.is_match(description) {
            rules.push(PolicyRule::new(holiday, description));
        }
    }
    rules
}
