//! dayaction focus timer

use clap::Parser;
use dayaction::calendar::SystemClock;
use dayaction::cli::GlobalOptions;
use dayaction::cli::display::{error, success};
use dayaction::engine::{FocusDurations, FocusTimer, TimerEvent};
use dayaction::focus_runner::{RunOutcome, apply_event, cancel_pair, run_cycle};
use dayaction::storage::FileStore;
use dayaction::tracker::Tracker;
use std::io::Write;
use std::time::Duration;

/// dayaction focus timer - work/break sessions that count towards focus time
#[derive(Parser, Debug)]
#[command(name = "dayaction-focus")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    options: GlobalOptions,

    /// Work period in minutes
    #[arg(long, default_value_t = 25)]
    work: u32,

    /// Break period in minutes
    #[arg(long = "break", default_value_t = 5)]
    break_minutes: u32,

    /// Number of work/break cycles to run
    #[arg(long, default_value_t = 1)]
    cycles: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let durations = FocusDurations::new(args.work, args.break_minutes)?;
    let store = FileStore::new(args.options.location()?);
    let mut tracker = Tracker::open(store, SystemClock, args.options.calendar());
    let mut timer = FocusTimer::new(durations);

    let (handle, cancel) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    for cycle in 1..=args.cycles {
        log::info!(
            "Cycle {}/{}: focus for {} minutes",
            cycle,
            args.cycles,
            durations.work_minutes()
        );

        let outcome = run_cycle(
            &mut timer,
            Duration::from_secs(1),
            cancel.clone(),
            |event, timer| {
                apply_event(&mut tracker, event);
                match event {
                    TimerEvent::WorkCompleted { minutes } => success(&format!(
                        "Focus period done: +{} minutes. Break for {}",
                        minutes,
                        timer.display()
                    )),
                    TimerEvent::BreakCompleted => success("Break over."),
                }
            },
        )
        .await;

        if outcome == RunOutcome::Cancelled {
            log::info!("Stopped with {} left.", timer.display());
            break;
        }
    }

    tracker.reload();
    let stats = tracker.stats();
    success(&format!(
        "Focus today: {} min, this week: {} min",
        stats.focus_time_today, stats.focus_time_this_week
    ));

    Ok(())
}
