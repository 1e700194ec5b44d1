//! Derived completion state that is recomputed whenever one of its three
//! inputs is replaced.
//!
//! Sources are always handed over whole; the tracker never applies deltas,
//! so the order in which tasks, habits and wellness arrive does not matter.

use crate::completion::{CompletionState, compute_completion_snapshot};
use crate::model::{Habit, Task, WellnessActivity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceState<T> {
    Loading,
    Failed(String),
    Ready(Vec<T>),
}

impl<T> SourceState<T> {
    fn items(&self) -> Option<&[T]> {
        match self {
            Self::Ready(items) => Some(items),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Loading | Self::Ready(_) => None,
        }
    }
}

impl<T> Default for SourceState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CompletionState)>;

pub struct CompletionTracker {
    tasks: SourceState<Task>,
    habits: SourceState<Habit>,
    wellness: SourceState<WellnessActivity>,
    state: CompletionState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self {
            tasks: SourceState::Loading,
            habits: SourceState::Loading,
            wellness: SourceState::Loading,
            state: CompletionState::loading(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    pub fn set_tasks(&mut self, tasks: SourceState<Task>) {
        self.tasks = tasks;
        self.recompute();
    }

    pub fn set_habits(&mut self, habits: SourceState<Habit>) {
        self.habits = habits;
        self.recompute();
    }

    pub fn set_wellness(&mut self, wellness: SourceState<WellnessActivity>) {
        self.wellness = wellness;
        self.recompute();
    }

    /// Registers `callback` for every future recomputation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CompletionState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn recompute(&mut self) {
        self.state = self.derive();

        if !self.state.loading {
            tracing::debug!(
                total_items = self.state.snapshot.total_items,
                completed_items = self.state.snapshot.completed_items,
                completion_percentage = self.state.snapshot.completion_percentage,
                fully_completed = self.state.snapshot.is_fully_completed,
                "completion recomputed"
            );
        }

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
    }

    fn derive(&self) -> CompletionState {
        let failure = self
            .tasks
            .failure()
            .or_else(|| self.habits.failure())
            .or_else(|| self.wellness.failure());
        if let Some(message) = failure {
            tracing::warn!(error = message, "completion source failed");
            return CompletionState::failed(message);
        }

        match (self.tasks.items(), self.habits.items(), self.wellness.items()) {
            (Some(tasks), Some(habits), Some(wellness)) => {
                CompletionState::ready(compute_completion_snapshot(tasks, habits, wellness))
            }
            _ => CompletionState::loading(),
        }
    }
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}
