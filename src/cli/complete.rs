//! Task completion command

use anyhow::Result;

use pulsequest::engine::{EventsService, ProgressEvent};

/// Record a task completion. The owning day is resolved from the catalog
/// unless `--day` is given explicitly.
pub fn complete_command(
    service: &mut EventsService,
    event_id: &str,
    task_id: &str,
    score: u32,
    minutes: u32,
    day: Option<String>,
) -> Result<()> {
    let day_id = match day.or_else(|| service.owning_day(event_id, task_id).map(str::to_string)) {
        Some(day_id) => day_id,
        None => {
            // Unknown to the catalog: record anyway, the cascade will
            // simply find nothing to do
            println!("note: task {task_id} is not in the catalog for {event_id}; recording as-is");
            task_id.to_string()
        }
    };

    if !service.is_task_unlocked(event_id, &day_id, task_id) {
        println!("warning: {task_id} is not unlocked yet");
    }

    let events = service.complete_task(event_id, &day_id, task_id, score, minutes);
    if events.is_empty() {
        println!("{task_id} was already completed - nothing changed.");
        return Ok(());
    }

    for event in &events {
        match event {
            ProgressEvent::TaskRecorded {
                task_id,
                score,
                gems_awarded,
            } => {
                println!("Completed {task_id}: +{score} XP, +{gems_awarded} gems");
            }
            ProgressEvent::StreakExtended { days } => {
                println!("Daily streak: {days} day(s)");
            }
            ProgressEvent::DayCompleted { day_id, next_day } => {
                println!("Day completed: {day_id} - day {next_day} is now open");
            }
            ProgressEvent::EventCompleted { event_id } => {
                println!("Event completed: {event_id}!");
            }
        }
    }
    Ok(())
}
