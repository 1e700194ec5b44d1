use crate::error::AppError;
use crate::model::{AppState, HabitRecord, Task, WellnessCompletion};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "store.json";
const STORE_ENV_VAR: &str = "MINDSYNC_STORE_PATH";

#[derive(Debug, Serialize, Deserialize)]
struct StoredState {
    schema_version: u32,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    habits: Vec<HabitRecord>,
    #[serde(default)]
    wellness_completions: Vec<WellnessCompletion>,
    #[serde(default)]
    app_state: AppState,
}

/// Everything the local user has recorded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreState {
    pub tasks: Vec<Task>,
    pub habits: Vec<HabitRecord>,
    pub wellness_completions: Vec<WellnessCompletion>,
    pub app_state: AppState,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("mindsync").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("mindsync")
            .join(STORE_FILE_NAME))
    }
}

pub fn load_state(path: &Path) -> Result<StoreState, AppError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "store missing, starting empty");
        return Ok(StoreState::default());
    }

    let content = std::fs::read_to_string(path)?;
    let stored: StoredState = serde_json::from_str(&content)?;

    if stored.schema_version != SCHEMA_VERSION {
        return Err(AppError::invalid_data("schema_version mismatch"));
    }

    ensure_unique_ids(stored.tasks.iter().map(|task| task.id.as_str()), "task")?;
    ensure_unique_ids(stored.habits.iter().map(|habit| habit.id.as_str()), "habit")?;

    tracing::debug!(
        path = %path.display(),
        tasks = stored.tasks.len(),
        habits = stored.habits.len(),
        wellness_completions = stored.wellness_completions.len(),
        "loaded store"
    );

    Ok(StoreState {
        tasks: stored.tasks,
        habits: stored.habits,
        wellness_completions: stored.wellness_completions,
        app_state: stored.app_state,
    })
}

pub fn save_state(path: &Path, state: &StoreState) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let stored = StoredState {
        schema_version: SCHEMA_VERSION,
        tasks: state.tasks.clone(),
        habits: state.habits.clone(),
        wellness_completions: state.wellness_completions.clone(),
        app_state: state.app_state.clone(),
    };
    let content = serde_json::to_string_pretty(&stored)?;
    std::fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)?;
    }

    tracing::debug!(path = %path.display(), "saved store");
    Ok(())
}

fn ensure_unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: &str,
) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AppError::invalid_data(format!("duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}
