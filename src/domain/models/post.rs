#[cfg(test)]
#[path = "post_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;
use serde_derive::Deserialize;
use serde_derive::Serialize;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingPost {
    pub scheduled_time: String,
    pub content: String,
}

impl UpcomingPost {
    /// Scheduled time rendered for humans. Offset aware timestamps are shown
    /// in local time, naive ones as given. Unparseable values are returned
    /// untouched.
    pub fn display_time(&self) -> String {
        let raw = self.scheduled_time.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return dt.format(DISPLAY_FORMAT).to_string();
            }
        }

        return raw.to_string();
    }

    pub fn first_line(&self, max_chars: usize) -> String {
        let line = self.content.split('\n').next().unwrap_or_default().trim();
        if line.chars().count() > max_chars {
            let truncated = line
                .chars()
                .take(max_chars.saturating_sub(3))
                .collect::<String>();
            return format!("{truncated}...");
        }

        return line.to_string();
    }
}

/// Scalar stats pulled out of the dashboard payload, sorted by key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub stats: Vec<(String, String)>,
}

impl DashboardSummary {
    pub fn from_value(value: &serde_json::Value) -> DashboardSummary {
        let mut stats = vec![];
        if let Some(obj) = value.as_object() {
            for (key, val) in obj {
                if key == "status" {
                    continue;
                }

                let rendered = match val {
                    serde_json::Value::String(s) => s.to_string(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    serde_json::Value::Array(items) => format!("{} items", items.len()),
                    _ => continue,
                };

                stats.push((key.replace('_', " "), rendered));
            }
        }

        stats.sort();
        return DashboardSummary { stats };
    }
}
