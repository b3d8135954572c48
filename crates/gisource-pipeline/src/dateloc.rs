//! Deadline phrases and week ranges in Chinese display form.

use chrono::{Datelike, Duration, NaiveDate};
use gisource_core::types::Deadline;

/// Chinese display phrase for a deadline cell.
pub fn deadline_phrase(deadline: &Deadline) -> String {
    match deadline {
        Deadline::Soon => "尽快申请".to_string(),
        Deadline::Date(date) => format!(
            "{}年{}月{}日申请截止",
            date.year(),
            date.month(),
            date.day()
        ),
        Deadline::Raw(_) => "日期格式错误".to_string(),
        Deadline::Missing => "日期信息缺失".to_string(),
    }
}

/// Sunday-through-Saturday week containing `today`, as YYYY-MM-DD strings.
/// Used for the document section subtitle.
pub fn week_range(today: NaiveDate) -> (String, String) {
    let start = today - Duration::days(today.weekday().num_days_from_monday() as i64 + 1);
    let end = start + Duration::days(6);
    (
        start.format("%Y-%m-%d").to_string(),
        end.format("%Y-%m-%d").to_string(),
    )
}
