mod app_state;
mod habit;
mod task;
mod wellness;

pub use app_state::{AppState, Mood};
pub use habit::{Habit, HabitRecord};
pub use task::Task;
pub use wellness::{DailyActivity, WellnessActivity, WellnessCompletion};
