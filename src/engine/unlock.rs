//! Unlock and completion resolvers
//!
//! Pure queries over catalog + progress. Every resolver fails closed:
//! unknown events, days or tasks read as locked/incomplete, never as an
//! error.

use crate::catalog::{find_event, Event};
use crate::progress::UserProgress;

/// Day 1 is always open; day n needs day n-1 (by catalog ordinal, not by
/// id arithmetic) in the completed set.
pub fn is_day_unlocked(
    catalog: &[Event],
    progress: &UserProgress,
    event_id: &str,
    day_number: u32,
) -> bool {
    if day_number == 1 {
        return true;
    }
    let Some(event) = find_event(catalog, event_id) else {
        return false;
    };
    let Some(previous) = event.day_by_number(day_number - 1) else {
        return false;
    };
    progress
        .events
        .get(event_id)
        .map(|ep| ep.completed_days.contains(&previous.id))
        .unwrap_or(false)
}

pub fn is_day_completed(progress: &UserProgress, event_id: &str, day_id: &str) -> bool {
    progress
        .events
        .get(event_id)
        .map(|ep| ep.completed_days.contains(day_id))
        .unwrap_or(false)
}

/// Tasks carry no unlock state of their own: a task is open iff its owning
/// day is open. A day or task missing from the catalog reads as locked.
pub fn is_task_unlocked(
    catalog: &[Event],
    progress: &UserProgress,
    event_id: &str,
    day_id: &str,
    task_id: &str,
) -> bool {
    let Some(event) = find_event(catalog, event_id) else {
        return false;
    };
    let Some(day) = event.day(day_id) else {
        return false;
    };
    if !day.tasks.iter().any(|t| t.id == task_id) {
        return false;
    }
    is_day_unlocked(catalog, progress, event_id, day.day_number)
}

pub fn is_task_completed(progress: &UserProgress, event_id: &str, task_id: &str) -> bool {
    progress
        .events
        .get(event_id)
        .map(|ep| ep.completed_tasks.contains(task_id))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::generator::generate_events;
    use crate::progress::EventProgress;
    use chrono::Utc;

    fn fixture() -> (Vec<Event>, UserProgress) {
        (generate_events(), UserProgress::new(Utc::now()))
    }

    #[test]
    fn test_day_one_always_unlocked() {
        let (catalog, progress) = fixture();
        assert!(is_day_unlocked(&catalog, &progress, "code-pulse", 1));
        // Even for an event nobody has touched or that does not exist
        assert!(is_day_unlocked(&catalog, &progress, "no-such-event", 1));
    }

    #[test]
    fn test_later_days_locked_without_progress() {
        let (catalog, progress) = fixture();
        assert!(!is_day_unlocked(&catalog, &progress, "code-pulse", 2));
        assert!(!is_day_unlocked(&catalog, &progress, "code-pulse", 99));
    }

    #[test]
    fn test_day_unlocks_after_previous_completed() {
        let (catalog, mut progress) = fixture();
        let mut ep = EventProgress::new("code-pulse", Utc::now());
        ep.completed_days.insert("code-pulse-day-1".into());
        progress.events.insert("code-pulse".into(), ep);

        assert!(is_day_unlocked(&catalog, &progress, "code-pulse", 2));
        assert!(!is_day_unlocked(&catalog, &progress, "code-pulse", 3));
    }

    #[test]
    fn test_unknown_ids_read_locked() {
        let (catalog, progress) = fixture();
        assert!(!is_task_unlocked(&catalog, &progress, "ghost", "ghost-day-1", "t"));
        assert!(!is_task_unlocked(
            &catalog,
            &progress,
            "code-pulse",
            "code-pulse-day-1",
            "not-a-task"
        ));
        assert!(!is_task_completed(&progress, "ghost", "t"));
        assert!(!is_day_completed(&progress, "ghost", "d"));
    }

    #[test]
    fn test_task_unlocked_with_day_one() {
        let (catalog, progress) = fixture();
        assert!(is_task_unlocked(
            &catalog,
            &progress,
            "code-pulse",
            "code-pulse-day-1",
            "code-pulse-day-1-task-1"
        ));
    }
}
