use crate::clock::{self, date_key};
use crate::error::AppError;
use crate::model::{HabitRecord, Mood, Task, WellnessActivity, WellnessCompletion};
use crate::storage::json_store::{self, StoreState};
use crate::wellness::{self, TipPool};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use time::Date;

pub const EXPORT_VERSION: &str = "1.0";
const CSV_HEADER: &str = "Type,Title,Status,Created Date,Completed Date";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDocument {
    pub version: &'static str,
    pub export_date: String,
    pub tasks: Vec<Task>,
    pub habits: Vec<HabitRecord>,
    pub wellness_completions: Vec<WellnessCompletion>,
    pub moods: BTreeMap<String, Mood>,
}

pub fn export_json() -> Result<String, AppError> {
    let path = json_store::store_path()?;
    export_json_with_path(&path)
}

/// Without a usable tip pool the wellness rows are left out.
pub fn export_csv(pool: Result<TipPool, AppError>) -> Result<String, AppError> {
    let path = json_store::store_path()?;
    export_csv_with_path(&path, pool, clock::today()?)
}

fn export_json_with_path(path: &Path) -> Result<String, AppError> {
    let state = json_store::load_state(path)?;
    let document = ExportDocument {
        version: EXPORT_VERSION,
        export_date: clock::now_rfc3339()?,
        tasks: state.tasks,
        habits: state.habits,
        wellness_completions: state.wellness_completions,
        moods: state.app_state.moods,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn export_csv_with_path(
    path: &Path,
    pool: Result<TipPool, AppError>,
    today: Date,
) -> Result<String, AppError> {
    let state = json_store::load_state(path)?;
    let wellness = pool
        .and_then(|pool| wellness::daily_wellness(today, &pool, &state.wellness_completions))
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "exporting without wellness rows");
            Vec::new()
        });
    Ok(render_csv(&state, &wellness, today))
}

/// One row per task, habit and wellness activity of `day`.
fn render_csv(state: &StoreState, wellness: &[WellnessActivity], day: Date) -> String {
    let day = date_key(day);
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for task in &state.tasks {
        let status = if task.completed { "Completed" } else { "Pending" };
        let completed_at = task.completed_at.as_deref().unwrap_or("");
        push_row(&mut csv, ["Task", &task.title, status, &task.created_at, completed_at]);
    }

    for habit in &state.habits {
        let done = habit.completed_on(&day);
        let status = if done { "Completed Today" } else { "Not Completed" };
        let completed_at = if done { day.as_str() } else { "" };
        push_row(&mut csv, ["Habit", &habit.title, status, &habit.created_at, completed_at]);
    }

    for activity in wellness {
        let status = if activity.completed { "Completed" } else { "Pending" };
        let completed_at = if activity.completed { day.as_str() } else { "" };
        push_row(&mut csv, ["Wellness", &activity.title, status, &day, completed_at]);
    }

    csv
}

fn push_row(csv: &mut String, fields: [&str; 5]) {
    let row = fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(&row);
    csv.push('\n');
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
