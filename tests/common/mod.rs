//! Shared test fixtures for engine integration tests

use pulsequest::catalog::{Day, Difficulty, Event, Reward, Task, TaskKind};

/// Build a synthetic event with `days` days of `tasks_per_day` tasks each.
/// Ids follow the catalog convention: `<event>-day-<n>` / `...-task-<m>`.
pub fn synthetic_event(event_id: &str, days: u32, tasks_per_day: u32) -> Event {
    let days: Vec<Day> = (1..=days)
        .map(|day_number| {
            let day_id = format!("{event_id}-day-{day_number}");
            let tasks = (1..=tasks_per_day)
                .map(|ordinal| Task {
                    id: format!("{day_id}-task-{ordinal}"),
                    day_id: day_id.clone(),
                    title: format!("Task {ordinal}"),
                    kind: TaskKind::EcgQuiz,
                    difficulty: Difficulty::Easy,
                    estimated_min: 5,
                    reward: Reward { xp: 50, gems: 5 },
                    ecg_image: None,
                    questions: Vec::new(),
                })
                .collect();
            Day {
                id: day_id,
                day_number,
                title: format!("Day {day_number}"),
                topic: "test".to_string(),
                tasks,
            }
        })
        .collect();

    Event {
        id: event_id.to_string(),
        title: event_id.to_string(),
        subtitle: String::new(),
        description: String::new(),
        total_days: days.len() as u32,
        days,
    }
}
