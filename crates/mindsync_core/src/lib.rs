pub mod clock;
pub mod completion;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod storage;
pub mod tracker;
pub mod tracker_api;
pub mod wellness;

pub use completion::{CompletionSnapshot, CompletionState, compute_completion_snapshot};
pub use wellness::{TipPool, generate_daily_wellness_set, overlay_completion};

#[cfg(test)]
mod tests {
    use crate::model::{Habit, Task, WellnessCompletion};
    use crate::{
        TipPool, compute_completion_snapshot, generate_daily_wellness_set, overlay_completion,
    };
    use time::macros::date;

    #[test]
    fn generated_wellness_feeds_the_aggregator() {
        let day = date!(2025 - 01 - 15);
        let pool = TipPool::builtin();
        let daily_set = generate_daily_wellness_set(day, &pool).unwrap();
        let records: Vec<WellnessCompletion> = daily_set
            .iter()
            .take(2)
            .map(|activity| WellnessCompletion {
                title: activity.title.clone(),
                date: "2025-01-15".to_string(),
            })
            .collect();
        let wellness = overlay_completion(&daily_set, &records, day);

        let tasks = vec![Task {
            id: "task-1".to_string(),
            title: "demo".to_string(),
            completed: true,
            created_at: "2025-01-15T08:00:00Z".to_string(),
            completed_at: None,
        }];
        let habits = vec![Habit {
            id: "habit-1".to_string(),
            title: "read".to_string(),
            streak: 0,
            completed_today: false,
        }];

        let snapshot = compute_completion_snapshot(&tasks, &habits, &wellness);
        assert_eq!(snapshot.total_items, 6);
        assert_eq!(snapshot.completed_items, 3);
        assert_eq!(snapshot.completion_percentage, 50);
        assert_eq!(snapshot.breakdown.wellness.percentage, 50);
    }
}
