//! Behavioral properties of the progression engine: idempotence,
//! monotonic completion, the sequential unlock chain and the
//! task -> day -> event cascade.

mod common;

use std::sync::Arc;

use pulsequest::engine::{EventsService, ProgressEvent};
use pulsequest::store::MemoryStore;

use common::synthetic_event;

fn service_with(events: Vec<pulsequest::catalog::Event>) -> EventsService {
    EventsService::with_catalog(Arc::new(MemoryStore::new()), events)
}

#[test]
fn completing_twice_counts_once() {
    let mut service = service_with(vec![synthetic_event("ev", 2, 2)]);

    service.complete_task("ev", "ev-day-1", "ev-day-1-task-1", 50, 3);
    let after_first = service.user_stats().clone();

    let repeat = service.complete_task("ev", "ev-day-1", "ev-day-1-task-1", 50, 3);
    assert!(repeat.is_empty());

    let after_second = service.user_stats();
    assert_eq!(after_second.total_xp, after_first.total_xp);
    assert_eq!(after_second.total_gems, after_first.total_gems);
    assert_eq!(after_second.tasks_completed, after_first.tasks_completed);
    assert_eq!(
        after_second.total_time_spent_min,
        after_first.total_time_spent_min
    );

    // Even a repeat with a different score re-credits nothing
    service.complete_task("ev", "ev-day-1", "ev-day-1-task-1", 100, 9);
    assert_eq!(service.user_stats().total_xp, after_first.total_xp);
}

#[test]
fn completion_state_only_grows() {
    let mut service = service_with(vec![synthetic_event("ev", 3, 2)]);

    let mut seen_tasks = 0;
    let mut seen_days = 0;
    let mut was_completed = false;

    for day in 1..=3u32 {
        for task in 1..=2u32 {
            service.complete_task(
                "ev",
                &format!("ev-day-{day}"),
                &format!("ev-day-{day}-task-{task}"),
                40,
                2,
            );

            let progress = service.event_progress("ev").unwrap();
            assert!(progress.completed_tasks.len() >= seen_tasks);
            assert!(progress.completed_days.len() >= seen_days);
            assert!(!was_completed || progress.is_completed, "completion reverted");

            seen_tasks = progress.completed_tasks.len();
            seen_days = progress.completed_days.len();
            was_completed = progress.is_completed;
        }
    }

    assert_eq!(seen_tasks, 6);
    assert_eq!(seen_days, 3);
    assert!(was_completed);
}

#[test]
fn days_unlock_in_sequence() {
    // N days of a single task each: finishing day k opens exactly day k+1
    let total_days = 4u32;
    let mut service = service_with(vec![synthetic_event("ev", total_days, 1)]);

    for day in 1..=total_days {
        assert!(service.is_day_unlocked("ev", day), "day {day} should be open");
        if day + 1 <= total_days {
            assert!(
                !service.is_day_unlocked("ev", day + 1),
                "day {} opened early",
                day + 1
            );
        }

        service.complete_task(
            "ev",
            &format!("ev-day-{day}"),
            &format!("ev-day-{day}-task-1"),
            50,
            1,
        );

        // Every day up to and including day+1 stays open from here on
        for opened in 1..=(day + 1).min(total_days) {
            assert!(service.is_day_unlocked("ev", opened));
        }
        if day + 2 <= total_days {
            assert!(!service.is_day_unlocked("ev", day + 2));
        }
    }
}

#[test]
fn partial_day_does_not_unlock_next() {
    let mut service = service_with(vec![synthetic_event("ev", 2, 2)]);

    service.complete_task("ev", "ev-day-1", "ev-day-1-task-1", 50, 1);
    assert!(!service.is_day_unlocked("ev", 2));
    assert!(!service.is_day_completed("ev", "ev-day-1"));

    service.complete_task("ev", "ev-day-1", "ev-day-1-task-2", 50, 1);
    assert!(service.is_day_unlocked("ev", 2));
    assert!(service.is_day_completed("ev", "ev-day-1"));
}

#[test]
fn cascade_completes_event_exactly_once() {
    let mut service = service_with(vec![synthetic_event("ev", 3, 2)]);

    // Complete days out of order: 2, 3, then 1. The recorder does not
    // gate on unlock state, and the event must still resolve exactly once.
    for day in [2u32, 3, 1] {
        for task in 1..=2u32 {
            service.complete_task(
                "ev",
                &format!("ev-day-{day}"),
                &format!("ev-day-{day}-task-{task}"),
                50,
                1,
            );
        }
    }

    let progress = service.event_progress("ev").unwrap();
    assert!(progress.is_completed);
    assert!(progress.completed_at.is_some());
    assert_eq!(service.user_stats().events_completed, 1);

    // Nothing left to re-trigger
    let repeat = service.complete_task("ev", "ev-day-1", "ev-day-1-task-1", 50, 1);
    assert!(repeat.is_empty());
    assert_eq!(service.user_stats().events_completed, 1);
}

#[test]
fn two_day_scenario_matches_expected_counters() {
    // Event with 2 days x 2 tasks: finish day 1, check every counter
    let mut service = service_with(vec![synthetic_event("ev", 2, 2)]);

    service.complete_task("ev", "ev-day-1", "ev-day-1-task-1", 50, 2);
    let events = service.complete_task("ev", "ev-day-1", "ev-day-1-task-2", 50, 2);

    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::DayCompleted { .. })));
    assert!(!events
        .iter()
        .any(|e| matches!(e, ProgressEvent::EventCompleted { .. })));

    let progress = service.event_progress("ev").unwrap();
    assert_eq!(progress.completed_days.len(), 1);
    assert!(progress.completed_days.contains("ev-day-1"));
    assert_eq!(progress.current_day, 2);
    assert!(!progress.is_completed);

    assert!(service.is_task_unlocked("ev", "ev-day-2", "ev-day-2-task-1"));
    assert!(service.is_task_unlocked("ev", "ev-day-2", "ev-day-2-task-2"));

    let stats = service.user_stats();
    assert_eq!(stats.tasks_completed, 2);
    assert_eq!(stats.total_xp, 100);

    // Repeating a finished task afterwards changes nothing
    service.complete_task("ev", "ev-day-1", "ev-day-1-task-1", 50, 2);
    let stats = service.user_stats();
    assert_eq!(stats.tasks_completed, 2);
    assert_eq!(stats.total_xp, 100);
    assert_eq!(service.event_progress("ev").unwrap().current_day, 2);
}

#[test]
fn mismatched_day_is_lenient() {
    let mut service = service_with(vec![synthetic_event("ev", 2, 1)]);

    // Day id not owned by the event: task records, cascade is silent
    let events = service.complete_task("ev", "other-day-9", "ev-day-1-task-1", 50, 1);
    assert!(matches!(events[0], ProgressEvent::TaskRecorded { .. }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, ProgressEvent::DayCompleted { .. })));

    assert!(service.is_task_completed("ev", "ev-day-1-task-1"));
    assert!(!service.is_day_completed("ev", "ev-day-1"));
    assert_eq!(service.user_stats().tasks_completed, 1);
}

#[test]
fn resolvers_fail_closed_on_unknown_ids() {
    let service = service_with(vec![synthetic_event("ev", 2, 1)]);

    assert!(service.is_day_unlocked("missing", 1)); // day 1 is always open
    assert!(!service.is_day_unlocked("missing", 2));
    assert!(!service.is_task_unlocked("missing", "d", "t"));
    assert!(!service.is_task_unlocked("ev", "ev-day-1", "no-such-task"));
    assert!(!service.is_task_completed("missing", "t"));
    assert!(service.event("missing").is_none());
    assert!(service.day("ev", "no-day").is_none());
    assert!(service.task("ev", "ev-day-1", "nope").is_none());
    assert_eq!(service.owning_day("ev", "nope"), None);
}

#[test]
fn locator_resolves_owning_day() {
    let service = service_with(vec![synthetic_event("ev", 2, 2)]);
    assert_eq!(service.owning_day("ev", "ev-day-2-task-1"), Some("ev-day-2"));
    // Scoped to the event
    assert_eq!(service.owning_day("other", "ev-day-2-task-1"), None);
}
