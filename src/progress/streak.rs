//! Daily activity streak
//!
//! Counts consecutive calendar days with at least one task completion.
//! A day counts once; a missed day resets the chain.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
    /// Last counted day as YYYY-MM-DD, local time
    pub last_activity_day: Option<String>,
}

impl StreakInfo {
    /// Streak still alive (activity today or yesterday)
    pub fn is_active(&self) -> bool {
        match self.days_since_last() {
            Some(days) => days <= 1,
            None => false,
        }
    }

    /// Count today's activity. Returns the new streak length the first
    /// time this is called on a given day, `None` on repeats.
    pub fn record_activity(&mut self) -> Option<u32> {
        let today = today_string();
        if self.last_activity_day.as_deref() == Some(today.as_str()) {
            return None; // Already counted today
        }

        self.current = match self.days_since_last() {
            Some(1) => self.current + 1,
            _ => 1, // Gap or first ever activity
        };
        self.best = self.best.max(self.current);
        self.last_activity_day = Some(today);
        Some(self.current)
    }

    fn days_since_last(&self) -> Option<i64> {
        let last = self.last_activity_day.as_deref()?;
        let last_date = NaiveDate::parse_from_str(last, "%Y-%m-%d").ok()?;
        Some((Local::now().date_naive() - last_date).num_days())
    }
}

/// Today's date as YYYY-MM-DD, local time
pub fn today_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
