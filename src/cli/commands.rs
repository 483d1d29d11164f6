//! CLI command definitions using clap

use crate::calendar::Calendar;
use crate::storage::{DataLocation, LocationError};
use chrono::Weekday;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Daily tasks, streaks, points and achievements
#[derive(Parser, Debug)]
#[command(name = "dayaction")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every binary
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Data directory (defaults to $DAYACTION_DATA_DIR, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// First day of the week for weekly counters
    #[arg(long, global = true, default_value = "sunday", value_parser = parse_weekday)]
    pub week_start: Weekday,

    /// Classify days in UTC instead of the local offset
    #[arg(long, global = true)]
    pub utc: bool,
}

impl GlobalOptions {
    pub fn calendar(&self) -> Calendar {
        let calendar = if self.utc {
            Calendar::utc()
        } else {
            Calendar::local()
        };
        calendar.with_week_start(self.week_start)
    }

    pub fn location(&self) -> Result<DataLocation, LocationError> {
        DataLocation::resolve(self.data_dir.as_deref())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,
    },

    /// List tasks (pending first)
    List {
        /// Only show pending tasks
        #[arg(short, long)]
        pending: bool,
    },

    /// Complete a pending task, or reopen a completed one
    #[command(alias = "done")]
    Toggle {
        /// Task ID or list position
        task: String,
    },

    /// Rename a task
    Edit {
        /// Task ID or list position
        task: String,

        /// New title
        title: String,
    },

    /// Delete a task
    Delete {
        /// Task ID or list position
        task: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show statistics
    Stats {
        /// Print the statistics record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show achievements and the current discount
    Achievements {
        /// Only show unlocked achievements
        #[arg(short, long)]
        unlocked: bool,

        /// Print the evaluated catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record minutes from a finished focus session
    Focus {
        /// Minutes to add
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        minutes: u32,
    },

    /// Greeting and today's summary
    Status,

    /// Show or change the profile
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New avatar reference (path or URL)
        #[arg(long)]
        avatar: Option<String>,
    },
}

pub fn parse_weekday(s: &str) -> Result<Weekday, String> {
    s.parse::<Weekday>()
        .map_err(|_| format!("Unknown weekday: {}", s))
}
