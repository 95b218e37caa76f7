//! # holiday-engine
//!
//! Turns Chinese public-holiday policy notices into dated records.
//!
//! Notices describe each holiday in free text ("1月28日至2月4日放假调休，共8天。
//! 1月26日、2月8日上班。"), leaving out years and months wherever a reader can
//! infer them. This crate recovers every date and whether it is a day off or
//! a compensatory workday, using pattern matching and the dates already seen
//! in the same description.
//!
//! ## Modules
//!
//! - [`resolver`] — one partial `[Y年][M月]D日` expression → concrete date
//! - [`extractor`] — single dates, ranges and `、` lists in a text fragment
//! - [`sentence`] — rest-day rules (off-day, workday, swap) over one sentence
//! - [`description`] — a holiday's whole description → [`DayRecord`]s
//! - [`rules`] — notice body → [`PolicyRule`]s
//! - [`paper`] — notice and year assembly, JSON output
//! - [`error`] — Error types

pub mod description;
pub mod error;
pub mod extractor;
pub mod paper;
pub mod resolver;
pub mod rules;
pub mod sentence;

pub use description::{parse_description, DayRecord};
pub use error::{HolidayError, Result};
pub use extractor::extract_dates;
pub use paper::{override_for, parse_paper, parse_rules, HolidayYear};
pub use resolver::{resolve, DateFragment, ParseContext};
pub use rules::{extract_rules, PolicyRule};
pub use sentence::{match_sentence, RestDay, RestRule};
