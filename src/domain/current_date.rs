//! The current date/time payload returned by the `current_date` tool

use chrono::{DateTime, Datelike, SecondsFormat, Utc, Weekday};
use rust_mcp_sdk::macros;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, macros::JsonSchema)]
pub struct CurrentDateResult {
    pub now: String,
    pub weekday: String,
}

impl CurrentDateResult {
    /// Both fields derive from the same instant, so they can never straddle a day boundary.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            now: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            weekday: weekday_ja(instant.weekday()).to_string(),
        }
    }
}

pub fn get_current_date(clock: &dyn Clock) -> CurrentDateResult {
    CurrentDateResult::at(clock.now())
}

/// Full weekday name as rendered for the ja-JP locale.
pub fn weekday_ja(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "月曜日",
        Weekday::Tue => "火曜日",
        Weekday::Wed => "水曜日",
        Weekday::Thu => "木曜日",
        Weekday::Fri => "金曜日",
        Weekday::Sat => "土曜日",
        Weekday::Sun => "日曜日",
    }
}
