use serde::{Deserialize, Serialize};

/// One entry of the generated daily set, before completion is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellnessActivity {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Marks `title` done on `date` (`YYYY-MM-DD`) for the local user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessCompletion {
    pub title: String,
    pub date: String,
}
