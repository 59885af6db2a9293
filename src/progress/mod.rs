//! Per-user progress state
//!
//! The mutable half of the system: which tasks/days/events a learner has
//! completed and the aggregate counters on top. Completion collections are
//! `BTreeSet`s so set semantics and stable serialization are properties of
//! the type, and timestamps are `DateTime<Utc>` so hydration never has to
//! fix up stringly dates.

mod ranks;
mod streak;

pub use ranks::{Rank, RANKS};
pub use streak::{today_string, StreakInfo};

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress within a single event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventProgress {
    pub event_id: String,
    /// 1-based pointer to the furthest reachable day. Never decreases,
    /// never exceeds the event's day count.
    pub current_day: u32,
    pub completed_days: BTreeSet<String>,
    pub completed_tasks: BTreeSet<String>,
    /// Sum of every recorded score in this event
    pub total_score: u32,
    /// Minutes spent on this event's tasks
    pub time_spent_min: u32,
    pub last_accessed: DateTime<Utc>,
    pub is_completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl EventProgress {
    /// Fresh progress record, created lazily on the first task completion
    pub fn new(event_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            event_id: event_id.to_string(),
            current_day: 1,
            completed_days: BTreeSet::new(),
            completed_tasks: BTreeSet::new(),
            total_score: 0,
            time_spent_min: 0,
            last_accessed: now,
            is_completed: false,
            completed_at: None,
        }
    }
}

/// Lifetime aggregates across all events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_xp: u64,
    pub total_gems: u64,
    pub total_time_spent_min: u64,
    pub events_completed: u32,
    /// First-time task completions only; repeats never re-count
    pub tasks_completed: u32,
    pub last_active_date: DateTime<Utc>,
    #[serde(default)]
    pub streak: StreakInfo,
}

impl OverallStats {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            total_xp: 0,
            total_gems: 0,
            total_time_spent_min: 0,
            events_completed: 0,
            tasks_completed: 0,
            last_active_date: now,
            streak: StreakInfo::default(),
        }
    }

    /// Average XP credited per completed task, rounded to the nearest
    /// integer. Scores double as XP here, so this is average reward, not
    /// an accuracy percentage.
    pub fn average_score(&self) -> u32 {
        if self.tasks_completed == 0 {
            return 0;
        }
        ((self.total_xp as f64 / self.tasks_completed as f64).round()) as u32
    }

    /// Current rank title for the accumulated XP
    pub fn rank(&self) -> &'static Rank {
        Rank::for_xp(self.total_xp)
    }
}

/// The full persisted progress snapshot: one record per touched event plus
/// the overall aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub events: BTreeMap<String, EventProgress>,
    pub overall_stats: OverallStats,
}

impl UserProgress {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            events: BTreeMap::new(),
            overall_stats: OverallStats::new(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_score_rounds() {
        let mut stats = OverallStats::new(Utc::now());
        assert_eq!(stats.average_score(), 0);

        stats.total_xp = 100;
        stats.tasks_completed = 3;
        assert_eq!(stats.average_score(), 33);

        stats.total_xp = 110;
        assert_eq!(stats.average_score(), 37); // 36.67 rounds up
    }

    #[test]
    fn test_progress_roundtrips_with_typed_dates() {
        let now = Utc::now();
        let mut progress = UserProgress::new(now);
        let mut ep = EventProgress::new("code-pulse", now);
        ep.completed_tasks.insert("code-pulse-day-1-task-1".into());
        ep.completed_at = Some(now);
        progress.events.insert("code-pulse".into(), ep);

        let json = serde_json::to_string(&progress).unwrap();
        let back: UserProgress = serde_json::from_str(&json).unwrap();

        let ep = &back.events["code-pulse"];
        assert_eq!(ep.last_accessed, now);
        assert_eq!(ep.completed_at, Some(now));
        assert!(ep.completed_tasks.contains("code-pulse-day-1-task-1"));
    }

    #[test]
    fn test_old_snapshot_without_streak_hydrates() {
        // Snapshots written before streak tracking carry no streak field
        let json = format!(
            r#"{{"events":{{}},"overall_stats":{{"total_xp":10,"total_gems":0,
                "total_time_spent_min":2,"events_completed":0,"tasks_completed":1,
                "last_active_date":"{}"}}}}"#,
            Utc::now().to_rfc3339()
        );
        let back: UserProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back.overall_stats.streak.current, 0);
    }
}
