//! dayaction CLI - daily tasks, streaks and achievements

use anyhow::{Result, anyhow};
use clap::Parser;
use dayaction::calendar::{Clock, Greeting, SystemClock};
use dayaction::cli::display::{
    display_achievements, display_profile, display_stats, display_task_list, error, success,
};
use dayaction::cli::{Cli, Commands};
use dayaction::engine::ToggleOutcome;
use dayaction::storage::{FileStore, Profile};
use dayaction::tracker::Tracker;
use std::io::{self, Write};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    if let Err(e) = &result {
        error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let location = cli.options.location()?;
    let calendar = cli.options.calendar();
    let store = FileStore::new(location);
    let mut tracker = Tracker::open(store, SystemClock, calendar);

    match cli.command {
        Commands::Add { title } => match tracker.add_task(&title) {
            Some(task) => success(&format!("Added {}: {}", task.id, task.title)),
            None => log::info!("Nothing added: the title is empty."),
        },

        Commands::List { pending } => {
            display_task_list(tracker.task_store(), tracker.calendar(), pending);
        }

        Commands::Toggle { task } => {
            let id = resolve(&tracker, &task)?;
            match tracker.toggle_task(&id) {
                ToggleOutcome::Completed => {
                    let stats = tracker.stats();
                    success(&format!(
                        "Completed {} (+{} points). Streak: {} days",
                        id,
                        tracker.task_store().get(&id).map(|t| t.points).unwrap_or(0),
                        stats.current_streak
                    ));
                }
                ToggleOutcome::Reopened => success(&format!("Reopened {}", id)),
                ToggleOutcome::NotFound => return Err(anyhow!("Task not found: {}", task)),
            }
        }

        Commands::Edit { task, title } => {
            let id = resolve(&tracker, &task)?;
            if tracker.edit_task(&id, &title) {
                success(&format!("Renamed {}: {}", id, title.trim()));
            } else {
                log::info!("Nothing changed: the title is empty.");
            }
        }

        Commands::Delete { task, force } => {
            let id = resolve(&tracker, &task)?;

            if !force {
                let title = tracker
                    .task_store()
                    .get(&id)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                print!("Delete {} '{}'? [y/N] ", id, title);
                io::stdout().flush()?;

                let mut input = String::new();
                io::stdin().read_line(&mut input)?;

                if !input.trim().eq_ignore_ascii_case("y") {
                    log::info!("Cancelled.");
                    return Ok(());
                }
            }

            tracker.delete_task(&id);
            success(&format!("Deleted {}", id));
        }

        Commands::Stats { json } => {
            let stats = tracker.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                display_stats(
                    &stats,
                    tracker.daily_progress_pct(),
                    tracker.discount_percent(),
                );
            }
        }

        Commands::Achievements { unlocked, json } => {
            let states = tracker.achievements();
            if json {
                println!("{}", serde_json::to_string_pretty(&states)?);
            } else {
                display_achievements(&states, unlocked, tracker.discount_percent());
            }
        }

        Commands::Focus { minutes } => {
            tracker.add_focus_time(minutes);
            let stats = tracker.stats();
            success(&format!(
                "Recorded {} focus minutes ({} this week)",
                minutes, stats.focus_time_this_week
            ));
        }

        Commands::Status => {
            let profile = Profile::load(tracker.store());
            let hour = tracker.calendar().hour_of(tracker.clock().now());
            let pending = tracker.task_store().pending().count();
            let stats = tracker.stats();

            println!("{}, {}!", Greeting::for_hour(hour), profile.user_name);
            println!(
                "You have {} {} left today.",
                pending,
                if pending == 1 { "task" } else { "tasks" }
            );
            println!(
                "Streak: {} days (longest {}), {} points",
                stats.current_streak, stats.longest_streak, stats.total_points
            );
        }

        Commands::Profile { name, avatar } => {
            let mut profile = Profile::load(tracker.store());

            if let Some(name) = name {
                if profile.set_user_name(tracker.store_mut(), &name)? {
                    success(&format!("Name set to {}", profile.user_name));
                } else {
                    log::info!("Nothing changed: the name is empty.");
                }
            }

            if let Some(avatar) = avatar {
                profile.set_avatar(tracker.store_mut(), &avatar)?;
                success("Avatar updated");
            }

            display_profile(&profile);
        }
    }

    Ok(())
}

/// Resolve a task reference (ID or list position) to its ID
fn resolve<S, C>(tracker: &Tracker<S, C>, reference: &str) -> Result<String>
where
    S: dayaction::storage::KeyValueStore,
    C: Clock,
{
    tracker
        .task_store()
        .resolve(reference)
        .map(|t| t.id.clone())
        .ok_or_else(|| anyhow!("Task not found: {}", reference))
}
