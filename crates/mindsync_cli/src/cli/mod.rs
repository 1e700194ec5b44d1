use clap::{Parser, Subcommand, ValueEnum};
use mindsync_core::config::ConfigOverrides;
use mindsync_core::model::Mood;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mindsync", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show today's completion across tasks, habits and wellness
    ///
    /// Example: mindsync status --json
    Status,
    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Manage habits
    Habit {
        #[command(subcommand)]
        action: HabitCommand,
    },
    /// Today's wellness activities
    Wellness {
        #[command(subcommand)]
        action: WellnessCommand,
    },
    /// Record how the day felt
    Mood {
        #[command(subcommand)]
        action: MoodCommand,
    },
    /// Export all recorded data to stdout
    ///
    /// Example: mindsync export --format csv > mindsync.csv
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task
    ///
    /// Example: mindsync task add "Buy milk"
    Add { title: String },
    /// Toggle a task between done and pending
    ///
    /// Example: mindsync task done task-1
    Done { id: String },
    /// Delete a task
    ///
    /// Example: mindsync task delete task-1
    Delete { id: String },
    /// List all tasks
    List,
}

#[derive(Subcommand, Debug)]
pub enum HabitCommand {
    /// Add a habit
    ///
    /// Example: mindsync habit add "Read 20 pages"
    Add { title: String },
    /// Toggle today's completion of a habit
    ///
    /// Example: mindsync habit done habit-1
    Done { id: String },
    /// List habits with today's status
    List,
}

#[derive(Subcommand, Debug)]
pub enum WellnessCommand {
    /// List today's six activities
    List,
    /// Toggle one of today's activities
    ///
    /// Example: mindsync wellness done wellness-20250115-0
    Done { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MoodCommand {
    /// Record a mood (angry, sad, meh, calm, happy, cool)
    ///
    /// Example: mindsync mood set calm --date 2025-01-15
    Set {
        mood: Mood,
        /// Day in YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// List recorded moods
    List,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    TipsPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let key = key_raw
        .trim()
        .to_ascii_lowercase()
        .replace(['-', ' '], "_");
    let value = value_raw.trim().to_string();

    let target = match key.as_str() {
        "" => return Err("override key cannot be empty".to_string()),
        "theme" => ConfigOverrideTarget::Theme,
        "tips_path" | "tips" | "tip_pool" => ConfigOverrideTarget::TipsPath,
        other => return Err(format!("unknown config field '{other}'")),
    };

    if value.is_empty() {
        return Err(format!("override for '{key}' needs a value"));
    }

    Ok(ParsedConfigOverride { target, value })
}

/// Later overrides win over earlier ones.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::TipsPath => {
                overrides.tips_path = Some(PathBuf::from(parsed.value));
            }
        }
    }
    Ok(overrides)
}
