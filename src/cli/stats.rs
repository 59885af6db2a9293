//! Overall stats command

use anyhow::Result;

use pulsequest::engine::EventsService;
use pulsequest::progress::Rank;

pub fn stats_command(service: &EventsService) -> Result<()> {
    let stats = service.user_stats();
    let rank = stats.rank();

    println!("Rank:            {}", rank.title);
    if let Some(next) = Rank::next_for_xp(stats.total_xp) {
        println!(
            "Next rank:       {} ({} XP to go)",
            next.title,
            next.xp_required - stats.total_xp
        );
    }
    println!("Total XP:        {}", stats.total_xp);
    println!("Gems:            {}", stats.total_gems);
    println!("Tasks completed: {}", stats.tasks_completed);
    println!("Events finished: {}", stats.events_completed);
    println!("Time spent:      {} min", stats.total_time_spent_min);
    println!("Average score:   {}", stats.average_score());

    let streak = &stats.streak;
    if streak.is_active() {
        println!("Daily streak:    {} (best {})", streak.current, streak.best);
    } else if streak.best > 0 {
        println!("Daily streak:    broken (best {})", streak.best);
    }

    let touched: Vec<_> = service
        .events()
        .into_iter()
        .filter(|e| e.progress.is_some())
        .collect();
    if !touched.is_empty() {
        println!("\nPer event:");
        for event in touched {
            let Some(progress) = event.progress.as_ref() else {
                continue;
            };
            println!(
                "  {:<20} {} task(s), score {}{}",
                event.id,
                progress.completed_tasks.len(),
                progress.total_score,
                if progress.is_completed { " [done]" } else { "" }
            );
        }
    }
    Ok(())
}
