//! Issue-time resolution for the short-term forecast service.
//!
//! Forecasts are only published at eight fixed hours a day. A request has to
//! name one of those batches by `base_date` / `base_time`.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

/// Hours at which a forecast batch is issued.
pub const ISSUE_HOURS: [u32; 8] = [2, 5, 8, 11, 14, 17, 20, 23];

/// Identifies one published forecast batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTimeWindow {
    /// `YYYYMMDD`
    pub date: String,
    /// `HHmm`, minutes always `00`
    pub time: String,
}

/// Pick the latest issue hour at or before `now`.
///
/// Before 02:00 there is no earlier batch on the same calendar day, and the
/// 23:00 batch of the previous day is not considered: the 02 slot of today is
/// returned instead. That batch is not published yet at that point, so the
/// upstream usually rejects it and the caller ends up on the demo data.
pub fn resolve(now: NaiveDateTime) -> IssueTimeWindow {
    let hour = now.hour();
    let base_hour = ISSUE_HOURS
        .iter()
        .copied()
        .filter(|h| *h <= hour)
        .last()
        .unwrap_or(ISSUE_HOURS[0]);

    IssueTimeWindow {
        date: now.format("%Y%m%d").to_string(),
        time: format!("{base_hour:02}00"),
    }
}

/// The `HH00` forecast slot covering `now`.
pub fn hour_slot(now: NaiveDateTime) -> String {
    format!("{:02}00", now.hour())
}

/// Long-form Korean timestamp, e.g. `2026년 10월 16일 금요일 오후 03:05`.
pub fn display_time(now: NaiveDateTime) -> String {
    let (is_pm, hour12) = now.hour12();
    let meridiem = if is_pm { "오후" } else { "오전" };

    format!(
        "{}년 {}월 {}일 {} {} {:02}:{:02}",
        now.year(),
        now.month(),
        now.day(),
        weekday_name(now.weekday()),
        meridiem,
        hour12,
        now.minute(),
    )
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}
