//! Rest-day rules: classify one sentence and tag the dates it mentions.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::Result;
use crate::extractor::extract_dates;
use crate::resolver::ParseContext;

static OFF_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.+)(?:放假|补休|调休|公休)+(?:[0-9]+天)?$").expect("valid off-day pattern")
});

static WORKDAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+)上班$").expect("valid workday pattern"));

static SWAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.+)调至(.+)").expect("valid swap pattern"));

/// A date tagged by a rule, before it is given a holiday name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestDay {
    pub date: NaiveDate,
    pub is_off_day: bool,
}

/// The sentence shapes that carry dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestRule {
    /// `…放假` / `…补休` / `…调休` / `…公休`, optionally followed by `N天`.
    OffDay,
    /// `…上班`.
    Workday,
    /// `A调至B`: A becomes a workday, B an off-day.
    Swap,
}

impl RestRule {
    /// Every rule, in the order they are applied.
    pub const ALL: [RestRule; 3] = [RestRule::OffDay, RestRule::Workday, RestRule::Swap];

    /// Apply this rule to `sentence`. A sentence that does not have the
    /// rule's shape yields nothing.
    pub fn apply(self, sentence: &str, ctx: &mut ParseContext) -> Result<Vec<RestDay>> {
        let mut days = Vec::new();
        match self {
            RestRule::OffDay => {
                for caps in OFF_DAY.captures_iter(sentence) {
                    tag(&mut days, &caps[1], true, ctx)?;
                }
            }
            RestRule::Workday => {
                for caps in WORKDAY.captures_iter(sentence) {
                    tag(&mut days, &caps[1], false, ctx)?;
                }
            }
            RestRule::Swap => {
                for caps in SWAP.captures_iter(sentence) {
                    tag(&mut days, &caps[1], false, ctx)?;
                    tag(&mut days, &caps[2], true, ctx)?;
                }
            }
        }
        if !days.is_empty() {
            log::debug!("{self:?} rule matched '{sentence}': {} day(s)", days.len());
        }
        Ok(days)
    }
}

fn tag(
    days: &mut Vec<RestDay>,
    date_text: &str,
    is_off_day: bool,
    ctx: &mut ParseContext,
) -> Result<()> {
    days.extend(
        extract_dates(date_text, ctx)?
            .into_iter()
            .map(|date| RestDay { date, is_off_day }),
    );
    Ok(())
}

/// Run every [`RestRule`] over `sentence`. Rules are not exclusive: a
/// sentence with several shapes contributes days from each.
pub fn match_sentence(sentence: &str, ctx: &mut ParseContext) -> Result<Vec<RestDay>> {
    log::trace!("sentence: '{sentence}'");
    let mut days = Vec::new();
    for rule in RestRule::ALL {
        days.extend(rule.apply(sentence, ctx)?);
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32, is_off_day: bool) -> RestDay {
        RestDay {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            is_off_day,
        }
    }

    #[test]
    fn test_off_day_rule_with_day_count() {
        let mut ctx = ParseContext::new("元旦", 2025);
        let days = match_sentence("1月1日（周三）放假1天", &mut ctx).unwrap();
        assert_eq!(days, vec![day(2025, 1, 1, true)]);
    }

    #[test]
    fn test_off_day_rule_with_repeated_keywords() {
        let mut ctx = ParseContext::new("劳动节", 2025);
        let days = match_sentence("5月1日至5日放假调休", &mut ctx).unwrap();
        assert_eq!(days.len(), 5);
        assert!(days.iter().all(|d| d.is_off_day));
    }

    #[test]
    fn test_each_off_day_keyword() {
        for keyword in ["放假", "补休", "调休", "公休"] {
            let mut ctx = ParseContext::new("test", 2024);
            let sentence = format!("3月4日{keyword}");
            let days = match_sentence(&sentence, &mut ctx).unwrap();
            assert_eq!(days, vec![day(2024, 3, 4, true)], "keyword {keyword}");
        }
    }

    #[test]
    fn test_off_day_keyword_must_end_sentence() {
        let mut ctx = ParseContext::new("test", 2024);
        let days = RestRule::OffDay
            .apply("3月4日放假期间注意安全", &mut ctx)
            .unwrap();
        assert!(days.is_empty());
    }

    #[test]
    fn test_workday_rule() {
        let mut ctx = ParseContext::new("春节", 2025);
        let days = match_sentence("2月9日（星期日）、2月10日（星期一）上班", &mut ctx).unwrap();
        assert_eq!(days, vec![day(2025, 2, 9, false), day(2025, 2, 10, false)]);
    }

    #[test]
    fn test_swap_rule() {
        let mut ctx = ParseContext::new("春节", 2025);
        let days = match_sentence("2月8日（星期六）调至2月17日（星期一）", &mut ctx).unwrap();
        assert_eq!(days, vec![day(2025, 2, 8, false), day(2025, 2, 17, true)]);
    }

    #[test]
    fn test_sentence_matching_no_rule() {
        let mut ctx = ParseContext::new("test", 2025);
        assert!(match_sentence("共8天", &mut ctx).unwrap().is_empty());
        assert!(match_sentence("", &mut ctx).unwrap().is_empty());
    }

    #[test]
    fn test_keyword_without_dates_yields_nothing() {
        let mut ctx = ParseContext::new("test", 2025);
        assert!(match_sentence("不调休", &mut ctx).unwrap().is_empty());
    }

    #[test]
    fn test_sentence_matching_two_rules() {
        // Swap claims nothing new once the off-day rule has recorded both dates.
        let mut ctx = ParseContext::new("test", 2024);
        let days = match_sentence("4月6日调至4月8日补休", &mut ctx).unwrap();
        assert_eq!(days, vec![day(2024, 4, 6, true), day(2024, 4, 8, true)]);
    }
}
