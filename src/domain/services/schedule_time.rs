#[cfg(test)]
#[path = "schedule_time_test.rs"]
mod tests;

use chrono::NaiveDateTime;

/// Format used by the schedule date and time inputs.
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Suggested schedule time: tomorrow at 09:00 in the same (local) clock as
/// `now`.
pub fn default_schedule_time(now: NaiveDateTime) -> String {
    let today = now.date();
    let tomorrow = today.succ_opt().unwrap_or(today);

    return tomorrow
        .and_hms_opt(9, 0, 0)
        .map(|dt| return dt.format(INPUT_FORMAT).to_string())
        .unwrap_or_default();
}
