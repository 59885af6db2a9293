//! Event listing and detail commands

use anyhow::Result;

use pulsequest::engine::EventsService;

/// List all events with a one-line progress summary
pub fn events_command(service: &EventsService) -> Result<()> {
    let events = service.events();
    println!("{} event(s):\n", events.len());

    for event in &events {
        let done_days = event.days.iter().filter(|d| d.completed).count();
        let marker = if event.is_completed {
            "[x]"
        } else if done_days > 0 {
            "[~]"
        } else {
            "[ ]"
        };
        println!(
            "  {} {:<20} {} - day {}/{} completed",
            marker, event.id, event.title, done_days, event.total_days
        );
    }

    println!("\nUse `pulsequest show <event>` for days and tasks.");
    Ok(())
}

/// Show one event's days and tasks with lock/completion state
pub fn show_command(service: &EventsService, event_id: &str) -> Result<()> {
    let Some(event) = service.event(event_id) else {
        println!("Unknown event: {event_id}");
        return Ok(());
    };

    println!("{} - {}", event.title, event.subtitle);
    println!("{}\n", event.description);

    if let Some(progress) = &event.progress {
        println!(
            "Progress: day {}/{}, score {}, {} min spent\n",
            progress.current_day,
            event.total_days,
            progress.total_score,
            progress.time_spent_min
        );
    }

    for day in &event.days {
        let day_marker = if day.completed {
            "x"
        } else if day.unlocked {
            " "
        } else {
            "-"
        };
        println!("  [{}] Day {} - {}", day_marker, day.day_number, day.title);

        if !day.unlocked {
            println!("        (locked - finish day {})", day.day_number - 1);
            continue;
        }

        for task in &day.tasks {
            let task_marker = if task.completed { "x" } else { " " };
            let score = task
                .best_score
                .map(|s| format!("  score {s}"))
                .unwrap_or_default();
            println!(
                "      [{}] {:<32} {} +{}xp/+{}g{}",
                task_marker,
                task.id,
                task.kind.as_str(),
                task.reward.xp,
                task.reward.gems,
                score
            );
        }
    }
    Ok(())
}
