//! Completion recording and the day/event cascade
//!
//! The single mutation path. Recording a task inserts it into the
//! completion set, credits aggregates once, then re-evaluates day and
//! event completion from scratch as plain set-containment checks. All
//! transitions are monotonic: nothing here ever un-completes anything.

use chrono::{DateTime, Utc};

use crate::catalog::{find_event, Event};
use crate::progress::{EventProgress, UserProgress};

/// What happened during one `complete_task` call, in order of occurrence.
/// An idempotent repeat produces no events at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    TaskRecorded {
        task_id: String,
        score: u32,
        gems_awarded: u32,
    },
    StreakExtended {
        days: u32,
    },
    DayCompleted {
        day_id: String,
        next_day: u32,
    },
    EventCompleted {
        event_id: String,
    },
}

/// Record a task completion and run the cascade.
///
/// A `day_id` the event does not own records the task and its aggregates
/// but cascades nothing: the day check finds no matching day and stops.
/// Kept lenient on purpose; see DESIGN.md.
pub(crate) fn record_completion(
    catalog: &[Event],
    progress: &mut UserProgress,
    event_id: &str,
    day_id: &str,
    task_id: &str,
    score: u32,
    time_spent_min: u32,
    now: DateTime<Utc>,
) -> Vec<ProgressEvent> {
    let entry = progress
        .events
        .entry(event_id.to_string())
        .or_insert_with(|| EventProgress::new(event_id, now));

    if entry.completed_tasks.contains(task_id) {
        tracing::debug!("Task {task_id} already completed, ignoring repeat");
        return Vec::new();
    }

    entry.completed_tasks.insert(task_id.to_string());
    entry.total_score += score;
    entry.time_spent_min += time_spent_min;
    entry.last_accessed = now;

    let gems_awarded = gem_reward(catalog, event_id, task_id);

    let stats = &mut progress.overall_stats;
    stats.total_xp += score as u64;
    stats.total_gems += gems_awarded as u64;
    stats.total_time_spent_min += time_spent_min as u64;
    stats.tasks_completed += 1;
    stats.last_active_date = now;

    let mut events = vec![ProgressEvent::TaskRecorded {
        task_id: task_id.to_string(),
        score,
        gems_awarded,
    }];

    if let Some(days) = stats.streak.record_activity() {
        events.push(ProgressEvent::StreakExtended { days });
    }

    tracing::info!("Task completed: {task_id} (score {score})");

    check_day_completion(catalog, progress, event_id, day_id, now, &mut events);
    events
}

/// Day done iff every catalog task of that day is in the completed set.
/// Re-checked from scratch on each call; safe under re-entry.
fn check_day_completion(
    catalog: &[Event],
    progress: &mut UserProgress,
    event_id: &str,
    day_id: &str,
    now: DateTime<Utc>,
    events: &mut Vec<ProgressEvent>,
) {
    let Some(event) = find_event(catalog, event_id) else {
        return;
    };
    let Some(day) = event.day(day_id) else {
        return;
    };
    let Some(entry) = progress.events.get_mut(event_id) else {
        return;
    };

    let all_done = day
        .tasks
        .iter()
        .all(|t| entry.completed_tasks.contains(&t.id));
    if !all_done || entry.completed_days.contains(day_id) {
        return;
    }

    entry.completed_days.insert(day_id.to_string());
    // Advance the pointer without ever moving it backwards or past the end
    let next_day = (day.day_number + 1).min(event.total_days);
    entry.current_day = entry.current_day.max(next_day);

    tracing::info!("Day completed: {day_id}, current day now {}", entry.current_day);
    events.push(ProgressEvent::DayCompleted {
        day_id: day_id.to_string(),
        next_day: entry.current_day,
    });

    check_event_completion(catalog, progress, event_id, now, events);
}

/// Event done iff every owned day id is in the completed set
fn check_event_completion(
    catalog: &[Event],
    progress: &mut UserProgress,
    event_id: &str,
    now: DateTime<Utc>,
    events: &mut Vec<ProgressEvent>,
) {
    let Some(event) = find_event(catalog, event_id) else {
        return;
    };
    let Some(entry) = progress.events.get_mut(event_id) else {
        return;
    };

    let all_days = event
        .days
        .iter()
        .all(|d| entry.completed_days.contains(&d.id));
    if !all_days || entry.is_completed {
        return;
    }

    entry.is_completed = true;
    entry.completed_at = Some(now);
    progress.overall_stats.events_completed += 1;

    tracing::info!("Event completed: {event_id}");
    events.push(ProgressEvent::EventCompleted {
        event_id: event_id.to_string(),
    });
}

/// Gem payout for a first-time completion, looked up anywhere in the
/// event so a lenient mismatched `day_id` still pays out
fn gem_reward(catalog: &[Event], event_id: &str, task_id: &str) -> u32 {
    find_event(catalog, event_id)
        .and_then(|event| {
            event
                .days
                .iter()
                .flat_map(|d| d.tasks.iter())
                .find(|t| t.id == task_id)
        })
        .map(|t| t.reward.gems)
        .unwrap_or(0)
}
