//! Read model: catalog merged with progress
//!
//! Produces the annotated tree the UI consumes. Views are owned snapshots;
//! recomputed on every read rather than cached, which keeps them trivially
//! consistent with the last mutation.

use serde::Serialize;

use crate::catalog::{Day, Difficulty, Event, Question, Reward, Task, TaskKind};
use crate::progress::{EventProgress, UserProgress};

use super::unlock;

#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: String,
    pub day_id: String,
    pub title: String,
    pub kind: TaskKind,
    pub difficulty: Difficulty,
    pub estimated_min: u32,
    pub reward: Reward,
    pub ecg_image: Option<String>,
    pub questions: Vec<Question>,
    pub unlocked: bool,
    pub completed: bool,
    /// Last recorded score for this task, if any
    pub best_score: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub id: String,
    pub day_number: u32,
    pub title: String,
    pub topic: String,
    pub unlocked: bool,
    pub completed: bool,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub total_days: u32,
    pub is_completed: bool,
    pub days: Vec<DayView>,
    pub progress: Option<EventProgress>,
}

/// Merge the whole catalog with progress. `score_of(event_id, task_id)`
/// reads the per-task score side table.
pub(crate) fn compose_events<F>(
    catalog: &[Event],
    progress: &UserProgress,
    score_of: &F,
) -> Vec<EventView>
where
    F: Fn(&str, &str) -> Option<u32>,
{
    catalog
        .iter()
        .map(|event| compose_event(catalog, progress, event, score_of))
        .collect()
}

pub(crate) fn compose_event<F>(
    catalog: &[Event],
    progress: &UserProgress,
    event: &Event,
    score_of: &F,
) -> EventView
where
    F: Fn(&str, &str) -> Option<u32>,
{
    let event_progress = progress.events.get(&event.id);
    EventView {
        id: event.id.clone(),
        title: event.title.clone(),
        subtitle: event.subtitle.clone(),
        description: event.description.clone(),
        total_days: event.total_days,
        is_completed: event_progress.map(|ep| ep.is_completed).unwrap_or(false),
        days: event
            .days
            .iter()
            .map(|day| compose_day(catalog, progress, event, day, score_of))
            .collect(),
        progress: event_progress.cloned(),
    }
}

pub(crate) fn compose_day<F>(
    catalog: &[Event],
    progress: &UserProgress,
    event: &Event,
    day: &Day,
    score_of: &F,
) -> DayView
where
    F: Fn(&str, &str) -> Option<u32>,
{
    DayView {
        id: day.id.clone(),
        day_number: day.day_number,
        title: day.title.clone(),
        topic: day.topic.clone(),
        unlocked: unlock::is_day_unlocked(catalog, progress, &event.id, day.day_number),
        completed: unlock::is_day_completed(progress, &event.id, &day.id),
        tasks: day
            .tasks
            .iter()
            .map(|task| compose_task(catalog, progress, event, day, task, score_of))
            .collect(),
    }
}

pub(crate) fn compose_task<F>(
    catalog: &[Event],
    progress: &UserProgress,
    event: &Event,
    day: &Day,
    task: &Task,
    score_of: &F,
) -> TaskView
where
    F: Fn(&str, &str) -> Option<u32>,
{
    TaskView {
        id: task.id.clone(),
        day_id: task.day_id.clone(),
        title: task.title.clone(),
        kind: task.kind,
        difficulty: task.difficulty,
        estimated_min: task.estimated_min,
        reward: task.reward,
        ecg_image: task.ecg_image.clone(),
        questions: task.questions.clone(),
        unlocked: unlock::is_task_unlocked(catalog, progress, &event.id, &day.id, &task.id),
        completed: unlock::is_task_completed(progress, &event.id, &task.id),
        best_score: score_of(&event.id, &task.id),
    }
}
