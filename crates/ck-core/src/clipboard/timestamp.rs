use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TimestampMs(i64);

impl TimestampMs {
    /// Unix epoch milliseconds (UTC)
    pub fn from_epoch_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn to_datetime_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        DateTime::<Utc>::from_timestamp_millis(self.0).map(|utc| utc.with_timezone(tz))
    }

    /// Short human label relative to `now`: "just now", "5 min ago", "3 h ago",
    /// then an absolute `MM-dd HH:mm` in local time once a day has passed.
    pub fn relative_to(&self, now: TimestampMs) -> String {
        self.relative_to_in(now, &Local)
    }

    pub fn relative_to_in<Tz>(&self, now: TimestampMs, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let elapsed = now.0.saturating_sub(self.0);

        if elapsed < MINUTE_MS {
            "just now".to_string()
        } else if elapsed < HOUR_MS {
            format!("{} min ago", elapsed / MINUTE_MS)
        } else if elapsed < DAY_MS {
            format!("{} h ago", elapsed / HOUR_MS)
        } else {
            self.format_in(tz, "%m-%d %H:%M")
        }
    }

    /// Full `yyyy-MM-dd HH:mm:ss` label in local time.
    pub fn full_date_time(&self) -> String {
        self.format_in(&Local, "%Y-%m-%d %H:%M:%S")
    }

    pub fn format_in<Tz>(&self, tz: &Tz, pattern: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self.to_datetime_in(tz) {
            Some(dt) => dt.format(pattern).to_string(),
            None => String::from("-"),
        }
    }
}

impl From<i64> for TimestampMs {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_labels_follow_elapsed_time() {
        let created = TimestampMs::from_epoch_millis(1_700_000_000_000);
        let at = |delta: i64| TimestampMs::from_epoch_millis(created.as_millis() + delta);

        assert_eq!(created.relative_to_in(at(5_000), &Utc), "just now");
        assert_eq!(created.relative_to_in(at(5 * MINUTE_MS), &Utc), "5 min ago");
        assert_eq!(created.relative_to_in(at(3 * HOUR_MS + 10), &Utc), "3 h ago");
        assert_eq!(created.relative_to_in(at(2 * DAY_MS), &Utc), "11-14 22:13");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let created = TimestampMs::from_epoch_millis(10_000);
        assert_eq!(
            created.relative_to_in(TimestampMs::from_epoch_millis(0), &Utc),
            "just now"
        );
    }

    #[test]
    fn formats_full_date_time() {
        let ts = TimestampMs::from_epoch_millis(1_700_000_000_000);
        assert_eq!(ts.format_in(&Utc, "%Y-%m-%d %H:%M:%S"), "2023-11-14 22:13:20");
    }
}
