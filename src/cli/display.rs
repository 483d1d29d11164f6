//! Display formatting for CLI output

use crate::calendar::{Calendar, date_key};
use crate::engine::{AchievementState, AchievementSummary, TaskStore};
use crate::models::{Stats, Task};
use crate::storage::Profile;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

/// Task row for table display
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Points")]
    points: u32,
    #[tabled(rename = "Completed")]
    completed_at: String,
}

impl TaskRow {
    fn new(position: usize, task: &Task, calendar: &Calendar) -> Self {
        TaskRow {
            position,
            id: task.id.clone(),
            title: truncate(&task.title, 40),
            status: if task.completed { "done" } else { "pending" }.to_string(),
            points: task.points,
            completed_at: task
                .completed_at
                .map(|at| calendar.localize(at).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Display tasks as a table, pending first
pub fn display_task_list(store: &TaskStore, calendar: &Calendar, pending_only: bool) {
    let rows: Vec<TaskRow> = store
        .display_order()
        .enumerate()
        .filter(|(_, task)| !pending_only || !task.completed)
        .map(|(i, task)| TaskRow::new(i + 1, task, calendar))
        .collect();

    if rows.is_empty() {
        log::info!("No tasks found.");
        return;
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(0)).with(Alignment::right()))
        .with(Modify::new(Columns::single(4)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Stats row for table display
#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(metric: &'static str, value: impl ToString) -> StatsRow {
    StatsRow {
        metric,
        value: value.to_string(),
    }
}

/// Display statistics with progress and discount
pub fn display_stats(stats: &Stats, daily_progress: u32, discount: u8) {
    let rows = vec![
        row("Current streak", format!("{} days", stats.current_streak)),
        row("Longest streak", format!("{} days", stats.longest_streak)),
        row("Total points", stats.total_points),
        row("Tasks completed", stats.total_tasks_completed),
        row("Completed today", stats.tasks_completed_today),
        row("Completed this week", stats.tasks_completed_this_week),
        row("Focus today", format!("{} min", stats.focus_time_today)),
        row("Focus this week", format!("{} min", stats.focus_time_this_week)),
        row(
            "Last completion",
            stats
                .last_completion_date
                .map(date_key)
                .unwrap_or_else(|| "-".to_string()),
        ),
        row("---", "---"),
        row("Daily progress", format!("{}%", daily_progress)),
        row("Weekly progress", format!("{}%", stats.weekly_progress_pct())),
        row("Premium discount", format!("{}%", discount)),
    ];

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Achievement row for table display
#[derive(Tabled)]
struct AchievementRow {
    #[tabled(rename = "")]
    mark: &'static str,
    #[tabled(rename = "Achievement")]
    title: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Reward")]
    reward: &'static str,
}

impl From<&AchievementState> for AchievementRow {
    fn from(state: &AchievementState) -> Self {
        AchievementRow {
            mark: if state.unlocked { "*" } else { " " },
            title: state.achievement.title,
            category: state.achievement.category.to_string(),
            progress: format!(
                "{}/{} ({}%)",
                state.current.min(state.achievement.requirement),
                state.achievement.requirement,
                (state.progress * 100.0).round()
            ),
            reward: state.achievement.reward,
        }
    }
}

/// Display achievements and the unlock summary
pub fn display_achievements(states: &[AchievementState], unlocked_only: bool, discount: u8) {
    let summary = AchievementSummary::from_states(states);
    let rows: Vec<AchievementRow> = states
        .iter()
        .filter(|s| !unlocked_only || s.unlocked)
        .map(AchievementRow::from)
        .collect();

    if rows.is_empty() {
        log::info!("No achievements unlocked yet.");
    } else {
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::single(3)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    println!(
        "Unlocked {} of {} ({}%)",
        summary.unlocked,
        summary.total,
        summary.percent()
    );
    if discount > 0 {
        println!("Streak discount on Premium: {}%", discount);
    }
}

/// Display the profile
pub fn display_profile(profile: &Profile) {
    println!("Name:     {}", profile.user_name);
    println!("Initials: {}", profile.initials());
    if let Some(ref avatar) = profile.avatar {
        println!("Avatar:   {}", avatar);
    }
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Format for success messages
pub fn success(msg: &str) {
    println!("{}", msg);
}

/// Format for error messages
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}
