use crate::model::{Habit, Task, WellnessActivity};
use serde::Serialize;

/// Wellness completions needed for the category to count as done.
pub const WELLNESS_TARGET: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub total: usize,
    pub completed: usize,
    pub percentage: u8,
}

impl CategoryBreakdown {
    fn from_counts(total: usize, completed: usize) -> Self {
        Self {
            total,
            completed,
            percentage: percentage(completed, total),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percentage == 100
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub tasks: CategoryBreakdown,
    pub habits: CategoryBreakdown,
    pub wellness: CategoryBreakdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionSnapshot {
    pub total_items: usize,
    pub completed_items: usize,
    pub completion_percentage: u8,
    pub breakdown: Breakdown,
    pub is_fully_completed: bool,
}

/// A snapshot plus whether the inputs behind it were available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionState {
    #[serde(flatten)]
    pub snapshot: CompletionSnapshot,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompletionState {
    pub fn ready(snapshot: CompletionSnapshot) -> Self {
        Self {
            snapshot,
            loading: false,
            error: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            snapshot: CompletionSnapshot::default(),
            loading: true,
            error: None,
        }
    }

    pub fn failed<M: Into<String>>(message: M) -> Self {
        Self {
            snapshot: CompletionSnapshot::default(),
            loading: true,
            error: Some(message.into()),
        }
    }
}

/// `round(100 * completed / total)` with halves rounded up; 0 when `total` is 0.
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * completed + total) / (2 * total);
    rounded.min(u8::MAX as usize) as u8
}

/// Wellness is scored against `min(WELLNESS_TARGET, len)`; completions past
/// the target add nothing.
pub fn wellness_breakdown(wellness: &[WellnessActivity]) -> CategoryBreakdown {
    let target = WELLNESS_TARGET.min(wellness.len());
    let raw_completed = wellness.iter().filter(|activity| activity.completed).count();

    CategoryBreakdown {
        total: target,
        completed: raw_completed.min(target),
        percentage: percentage(raw_completed, target).min(100),
    }
}

pub fn compute_completion_snapshot(
    tasks: &[Task],
    habits: &[Habit],
    wellness: &[WellnessActivity],
) -> CompletionSnapshot {
    let tasks = CategoryBreakdown::from_counts(
        tasks.len(),
        tasks.iter().filter(|task| task.completed).count(),
    );
    let habits = CategoryBreakdown::from_counts(
        habits.len(),
        habits.iter().filter(|habit| habit.completed_today).count(),
    );
    let wellness = wellness_breakdown(wellness);

    let total_items = tasks.total + habits.total + wellness.total;
    let completed_items = tasks.completed + habits.completed + wellness.completed;
    let completion_percentage = percentage(completed_items, total_items);

    CompletionSnapshot {
        total_items,
        completed_items,
        completion_percentage,
        breakdown: Breakdown {
            tasks,
            habits,
            wellness,
        },
        is_fully_completed: completion_percentage == 100,
    }
}
