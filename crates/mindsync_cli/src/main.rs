use clap::Parser;
use mindsync_cli::cli::{
    Cli, Command, ExportFormat, HabitCommand, MoodCommand, TaskCommand, WellnessCommand,
    collect_config_overrides,
};
use mindsync_core::clock;
use mindsync_core::completion::{CategoryBreakdown, CompletionState};
use mindsync_core::config::{self, Config, Palette};
use mindsync_core::error::AppError;
use mindsync_core::export;
use mindsync_core::model::{Habit, Task, WellnessActivity};
use mindsync_core::tracker_api;
use mindsync_core::wellness;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "MINDSYNC_LOG";

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Done")]
    completed: usize,
    #[tabled(rename = "Target")]
    total: usize,
    #[tabled(rename = "Progress")]
    percentage: String,
}

impl BreakdownRow {
    fn new(category: &'static str, breakdown: &CategoryBreakdown) -> Self {
        Self {
            category,
            completed: breakdown.completed,
            total: breakdown.total,
            percentage: if breakdown.is_complete() {
                format!("{}% done", breakdown.percentage)
            } else {
                format!("{}%", breakdown.percentage)
            },
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn checkbox(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

fn print_status(state: &CompletionState, palette: &Palette) {
    if let Some(error) = state.error.as_deref() {
        println!("Completion unavailable: {error}");
        return;
    }

    let snapshot = &state.snapshot;
    println!(
        "Today: {} ({} of {} items)",
        palette.percentage(snapshot.completion_percentage),
        snapshot.completed_items,
        snapshot.total_items
    );

    let rows = [
        BreakdownRow::new("Tasks", &snapshot.breakdown.tasks),
        BreakdownRow::new("Habits", &snapshot.breakdown.habits),
        BreakdownRow::new("Wellness", &snapshot.breakdown.wellness),
    ];
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if snapshot.is_fully_completed {
        println!("{}", palette.accentize("Everything done for today."));
    }
}

fn print_task(verb: &str, task: &Task, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string(task)?);
    } else {
        println!("{verb} task: {} ({})", task.title, task.id);
    }
    Ok(())
}

fn print_tasks(tasks: &[Task], json: bool, palette: &Palette) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string(tasks)?);
        return Ok(());
    }
    for task in tasks {
        println!(
            "{} {} {}",
            checkbox(task.completed),
            task.title,
            palette.mutedize(&format!("({})", task.id))
        );
    }
    Ok(())
}

fn print_habits(habits: &[Habit], json: bool, palette: &Palette) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string(habits)?);
        return Ok(());
    }
    for habit in habits {
        println!(
            "{} {} streak {} {}",
            checkbox(habit.completed_today),
            habit.title,
            habit.streak,
            palette.mutedize(&format!("({})", habit.id))
        );
    }
    Ok(())
}

fn print_wellness(
    activities: &[WellnessActivity],
    json: bool,
    palette: &Palette,
) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string(activities)?);
        return Ok(());
    }
    for activity in activities {
        println!(
            "{} {} {}",
            checkbox(activity.completed),
            activity.title,
            palette.mutedize(&format!("({})", activity.id))
        );
    }
    println!("Wellness: {}", palette.percentage(wellness::wellness_percentage(activities)));
    Ok(())
}

fn resolve_config(overrides: &[String]) -> Result<Config, AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: using default config: {err}");
    }
    let overrides = collect_config_overrides(overrides).map_err(AppError::invalid_input)?;
    Ok(config::merge_overrides(&loaded.config, &overrides))
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config = resolve_config(&cli.config_override)?;
    let palette = config.palette();
    let json = cli.json;

    match cli.command {
        Command::Status => {
            let state = tracker_api::completion_today(config.tip_pool())?;
            if json {
                println!("{}", serde_json::to_string(&state)?);
            } else {
                print_status(&state, &palette);
            }
        }
        Command::Task { action } => match action {
            TaskCommand::Add { title } => {
                print_task("Added", &tracker_api::add_task(&title)?, json)?;
            }
            TaskCommand::Done { id } => {
                let task = tracker_api::toggle_task(&id)?;
                let verb = if task.completed { "Completed" } else { "Reopened" };
                print_task(verb, &task, json)?;
            }
            TaskCommand::Delete { id } => {
                print_task("Deleted", &tracker_api::delete_task(&id)?, json)?;
            }
            TaskCommand::List => print_tasks(&tracker_api::list_tasks()?, json, &palette)?,
        },
        Command::Habit { action } => match action {
            HabitCommand::Add { title } => {
                let habit = tracker_api::add_habit(&title)?;
                if json {
                    println!("{}", serde_json::to_string(&habit)?);
                } else {
                    println!("Added habit: {} ({})", habit.title, habit.id);
                }
            }
            HabitCommand::Done { id } => {
                let habit = tracker_api::toggle_habit(&id)?;
                if json {
                    println!("{}", serde_json::to_string(&habit)?);
                } else if habit.completed_today {
                    println!("Completed habit: {} (streak {})", habit.title, habit.streak);
                } else {
                    println!("Unmarked habit: {} (streak {})", habit.title, habit.streak);
                }
            }
            HabitCommand::List => print_habits(&tracker_api::list_habits()?, json, &palette)?,
        },
        Command::Wellness { action } => {
            let pool = config.tip_pool()?;
            match action {
                WellnessCommand::List => {
                    print_wellness(&tracker_api::list_wellness(&pool)?, json, &palette)?;
                }
                WellnessCommand::Done { id } => {
                    let activity = tracker_api::toggle_wellness(&id, &pool)?;
                    if json {
                        println!("{}", serde_json::to_string(&activity)?);
                    } else {
                        let verb = if activity.completed { "Completed" } else { "Unmarked" };
                        println!("{verb} wellness activity: {}", activity.title);
                    }
                }
            }
        }
        Command::Mood { action } => match action {
            MoodCommand::Set { mood, date } => {
                let date = match date {
                    Some(raw) => clock::parse_date(&raw)?,
                    None => clock::today()?,
                };
                let moods = tracker_api::set_mood(date, mood)?;
                if json {
                    println!("{}", serde_json::to_string(&moods)?);
                } else {
                    println!("Recorded mood {mood} for {}", clock::date_key(date));
                }
            }
            MoodCommand::List => {
                let moods = tracker_api::list_moods()?;
                if json {
                    println!("{}", serde_json::to_string(&moods)?);
                } else {
                    for (day, mood) in &moods {
                        println!("{day} {mood}");
                    }
                }
            }
        },
        Command::Export { format } => {
            let document = match format {
                ExportFormat::Json => export::export_json()?,
                ExportFormat::Csv => export::export_csv(config.tip_pool())?,
            };
            print!("{document}");
            if format == ExportFormat::Json {
                println!();
            }
        }
    }

    Ok(())
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            print!("{err}");
            return;
        }
        Err(err) => {
            let rendered = err.to_string();
            let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
            let message = first_line.strip_prefix("error: ").unwrap_or(first_line);
            eprintln!("ERROR: {}", AppError::invalid_input(message));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        tracing::debug!(code = err.code(), "command failed");
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
