//! Paper and year assembly.
//!
//! A paper is one policy notice. Its day records are the concatenation of
//! its rules' records, except for a few notices whose wording the rule
//! heuristics cannot read; those come from a curated table keyed by the
//! notice's source URL.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::description::DayRecord;
use crate::error::Result;
use crate::rules::{extract_rules, PolicyRule};

struct Override {
    paper: &'static str,
    name: &'static str,
    /// `(year, month, day, is_off_day)`
    days: &'static [(i32, u32, u32, bool)],
}

const OVERRIDES: &[Override] = &[
    Override {
        paper: "http://www.gov.cn/zhengce/zhengceku/2015-05/13/content_9742.htm",
        name: "抗日战争暨世界反法西斯战争胜利70周年纪念日",
        days: &[
            (2015, 9, 3, true),
            (2015, 9, 4, true),
            (2015, 9, 5, true),
            (2015, 9, 6, false),
        ],
    },
    Override {
        paper: "http://www.gov.cn/zhengce/zhengceku/2020-01/27/content_5472352.htm",
        name: "春节",
        days: &[
            (2020, 1, 31, true),
            (2020, 2, 1, true),
            (2020, 2, 2, true),
            (2020, 2, 3, false),
        ],
    },
];

/// Curated records for `paper_id`, if it is one of the notices the rule
/// heuristics cannot handle.
pub fn override_for(paper_id: &str) -> Option<Vec<DayRecord>> {
    let entry = OVERRIDES.iter().find(|o| o.paper == paper_id)?;
    entry
        .days
        .iter()
        .map(|&(y, m, d, is_off_day)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| DayRecord::new(entry.name, date, is_off_day))
        })
        .collect()
}

/// Parse every rule for `year` and concatenate the records in rule order.
pub fn parse_rules(rules: &[PolicyRule], year: i32) -> Result<Vec<DayRecord>> {
    let mut days = Vec::new();
    for rule in rules {
        days.extend(rule.parse(year)?);
    }
    Ok(days)
}

/// Day records of one notice.
///
/// `paper_id` identifies the notice (its source URL) and selects a curated
/// override when there is one; otherwise the rules are extracted from `text`.
pub fn parse_paper(paper_id: &str, text: &str, year: i32) -> Result<Vec<DayRecord>> {
    if let Some(days) = override_for(paper_id) {
        log::warn!("using curated records for {paper_id}");
        return Ok(days);
    }
    let rules = extract_rules(text)?;
    parse_rules(&rules, year)
}

/// All arrangements published for one year.
///
/// Serializes as `{"year": 2025, "papers": [...], "days": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayYear {
    pub year: i32,
    /// Source ids of the notices, in the order they were added.
    pub papers: Vec<String>,
    pub days: Vec<DayRecord>,
}

impl HolidayYear {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// Append already-parsed records of one notice.
    pub fn add_paper(&mut self, paper_id: impl Into<String>, days: Vec<DayRecord>) {
        self.papers.push(paper_id.into());
        self.days.extend(days);
    }

    /// Parse a notice's text for this year and append its records.
    ///
    /// On error nothing is appended.
    pub fn add_notice(&mut self, paper_id: &str, text: &str) -> Result<()> {
        let days = parse_paper(paper_id, text, self.year)?;
        self.add_paper(paper_id, days);
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
