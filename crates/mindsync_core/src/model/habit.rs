use serde::{Deserialize, Serialize};

/// A habit as seen by the aggregator for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub streak: u32,
    pub completed_today: bool,
}

/// A habit as persisted, with the dates it was marked done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: String,
    pub title: String,
    pub created_at: String,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// `YYYY-MM-DD` local dates, oldest first.
    #[serde(default)]
    pub completion_dates: Vec<String>,
}

impl HabitRecord {
    pub fn completed_on(&self, date: &str) -> bool {
        self.completion_dates.iter().any(|value| value == date)
    }

    pub fn for_day(&self, date: &str) -> Habit {
        Habit {
            id: self.id.clone(),
            title: self.title.clone(),
            streak: self.current_streak,
            completed_today: self.completed_on(date),
        }
    }
}
