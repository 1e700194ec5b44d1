use crate::clock::{self, date_key};
use crate::completion::CompletionState;
use crate::error::AppError;
use crate::model::{Habit, HabitRecord, Mood, Task, WellnessActivity};
use crate::storage::json_store::{self, StoreState};
use crate::tracker::{CompletionTracker, SourceState};
use crate::wellness::{self, TipPool};
use std::collections::BTreeMap;
use std::path::Path;
use time::{Date, OffsetDateTime};

pub fn add_task(title: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    add_task_with_path(&path, title)
}

pub fn toggle_task(id: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    toggle_task_with_path(&path, id)
}

pub fn delete_task(id: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    delete_task_with_path(&path, id)
}

pub fn list_tasks() -> Result<Vec<Task>, AppError> {
    let path = json_store::store_path()?;
    Ok(json_store::load_state(&path)?.tasks)
}

pub fn add_habit(title: &str) -> Result<HabitRecord, AppError> {
    let path = json_store::store_path()?;
    add_habit_with_path(&path, title)
}

pub fn toggle_habit(id: &str) -> Result<Habit, AppError> {
    let path = json_store::store_path()?;
    toggle_habit_with_path(&path, id, clock::today()?)
}

pub fn list_habits() -> Result<Vec<Habit>, AppError> {
    let path = json_store::store_path()?;
    list_habits_with_path(&path, clock::today()?)
}

pub fn list_wellness(pool: &TipPool) -> Result<Vec<WellnessActivity>, AppError> {
    let path = json_store::store_path()?;
    list_wellness_with_path(&path, pool, clock::today()?)
}

pub fn toggle_wellness(id: &str, pool: &TipPool) -> Result<WellnessActivity, AppError> {
    let path = json_store::store_path()?;
    toggle_wellness_with_path(&path, id, pool, clock::today()?)
}

/// Today's completion across tasks, habits and wellness.
///
/// An unreadable store or tip pool does not fail the call; it is reported
/// through the loading flag and `error` of the returned state.
pub fn completion_today(pool: Result<TipPool, AppError>) -> Result<CompletionState, AppError> {
    let path = json_store::store_path()?;
    Ok(completion_for_day(&path, pool, clock::today()?))
}

pub fn set_mood(date: Date, mood: Mood) -> Result<BTreeMap<String, Mood>, AppError> {
    let path = json_store::store_path()?;
    set_mood_with_path(&path, date, mood)
}

pub fn list_moods() -> Result<BTreeMap<String, Mood>, AppError> {
    let path = json_store::store_path()?;
    Ok(json_store::load_state(&path)?.app_state.moods)
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input(format!("{field} is required")));
    }
    Ok(trimmed)
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", OffsetDateTime::now_utc().unix_timestamp_nanos())
}

fn add_task_with_path(path: &Path, title: &str) -> Result<Task, AppError> {
    let title = required(title, "title")?;
    let task = Task {
        id: new_id("task"),
        title: title.to_string(),
        completed: false,
        created_at: clock::now_rfc3339()?,
        completed_at: None,
    };

    let mut state = json_store::load_state(path)?;
    state.tasks.push(task.clone());
    json_store::save_state(path, &state)?;
    tracing::info!(id = %task.id, "task added");

    Ok(task)
}

fn toggle_task_with_path(path: &Path, id: &str) -> Result<Task, AppError> {
    let id = required(id, "id")?;
    let mut state = json_store::load_state(path)?;
    let task = state
        .tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| AppError::invalid_input("task not found"))?;

    task.completed = !task.completed;
    task.completed_at = if task.completed {
        Some(clock::now_rfc3339()?)
    } else {
        None
    };
    let updated = task.clone();

    json_store::save_state(path, &state)?;
    tracing::info!(id = %updated.id, completed = updated.completed, "task toggled");

    Ok(updated)
}

fn delete_task_with_path(path: &Path, id: &str) -> Result<Task, AppError> {
    let id = required(id, "id")?;
    let mut state = json_store::load_state(path)?;
    let index = state
        .tasks
        .iter()
        .position(|task| task.id == id)
        .ok_or_else(|| AppError::invalid_input("task not found"))?;

    let removed = state.tasks.remove(index);
    json_store::save_state(path, &state)?;

    Ok(removed)
}

fn add_habit_with_path(path: &Path, title: &str) -> Result<HabitRecord, AppError> {
    let title = required(title, "title")?;
    let habit = HabitRecord {
        id: new_id("habit"),
        title: title.to_string(),
        created_at: clock::now_rfc3339()?,
        current_streak: 0,
        longest_streak: 0,
        completion_dates: Vec::new(),
    };

    let mut state = json_store::load_state(path)?;
    state.habits.push(habit.clone());
    json_store::save_state(path, &state)?;
    tracing::info!(id = %habit.id, "habit added");

    Ok(habit)
}

/// Marks the habit done for `today`, or unmarks it if already done.
///
/// Marking extends the current streak; unmarking shortens it, never below 0.
fn toggle_habit_with_path(path: &Path, id: &str, today: Date) -> Result<Habit, AppError> {
    let id = required(id, "id")?;
    let day = date_key(today);
    let mut state = json_store::load_state(path)?;
    let habit = state
        .habits
        .iter_mut()
        .find(|habit| habit.id == id)
        .ok_or_else(|| AppError::invalid_input("habit not found"))?;

    if habit.completed_on(&day) {
        habit.completion_dates.retain(|date| *date != day);
        habit.current_streak = habit.current_streak.saturating_sub(1);
    } else {
        habit.completion_dates.push(day.clone());
        habit.completion_dates.sort();
        habit.current_streak += 1;
        habit.longest_streak = habit.longest_streak.max(habit.current_streak);
    }
    let updated = habit.for_day(&day);

    json_store::save_state(path, &state)?;
    tracing::info!(id = %updated.id, completed_today = updated.completed_today, "habit toggled");

    Ok(updated)
}

fn list_habits_with_path(path: &Path, today: Date) -> Result<Vec<Habit>, AppError> {
    let state = json_store::load_state(path)?;
    Ok(habits_for_day(&state, today))
}

fn habits_for_day(state: &StoreState, day: Date) -> Vec<Habit> {
    let day = date_key(day);
    state.habits.iter().map(|habit| habit.for_day(&day)).collect()
}

fn list_wellness_with_path(
    path: &Path,
    pool: &TipPool,
    today: Date,
) -> Result<Vec<WellnessActivity>, AppError> {
    let state = json_store::load_state(path)?;
    wellness::daily_wellness(today, pool, &state.wellness_completions)
}

fn toggle_wellness_with_path(
    path: &Path,
    id: &str,
    pool: &TipPool,
    today: Date,
) -> Result<WellnessActivity, AppError> {
    let id = required(id, "id")?;
    let daily_set = wellness::generate_daily_wellness_set(today, pool)?;
    let activity = daily_set
        .iter()
        .find(|activity| activity.id == id)
        .ok_or_else(|| AppError::invalid_input("wellness activity not found for today"))?;

    let mut state = json_store::load_state(path)?;
    let completed =
        wellness::toggle_completion(&mut state.wellness_completions, &activity.title, today);
    json_store::save_state(path, &state)?;
    tracing::info!(id = %activity.id, completed, "wellness activity toggled");

    Ok(WellnessActivity {
        id: activity.id.clone(),
        title: activity.title.clone(),
        completed,
    })
}

fn completion_for_day(path: &Path, pool: Result<TipPool, AppError>, day: Date) -> CompletionState {
    let mut tracker = CompletionTracker::new();

    let state = match json_store::load_state(path) {
        Ok(state) => state,
        Err(err) => {
            tracker.set_tasks(SourceState::Failed(err.to_string()));
            return tracker.state().clone();
        }
    };

    tracker.set_tasks(SourceState::Ready(state.tasks.clone()));
    tracker.set_habits(SourceState::Ready(habits_for_day(&state, day)));
    let wellness = pool
        .and_then(|pool| wellness::daily_wellness(day, &pool, &state.wellness_completions));
    tracker.set_wellness(match wellness {
        Ok(activities) => SourceState::Ready(activities),
        Err(err) => SourceState::Failed(err.to_string()),
    });

    tracker.state().clone()
}

fn set_mood_with_path(
    path: &Path,
    date: Date,
    mood: Mood,
) -> Result<BTreeMap<String, Mood>, AppError> {
    let mut state = json_store::load_state(path)?;
    state.app_state.moods.insert(date_key(date), mood);
    json_store::save_state(path, &state)?;
    Ok(state.app_state.moods)
}
