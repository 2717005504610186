//! Aggregate statistics over goal and reminder collections.
//!
//! Pure functions shared by the home and settings services.

use crate::model::goal::Goal;
use crate::model::reminder::Reminder;
use chrono::{DateTime, Utc};

/// Goal counts by state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalStatistics {
    pub completed: usize,
    /// Everything not completed, overdue included.
    pub in_progress: usize,
    pub overdue: usize,
}

/// Reminder counts by state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderStatistics {
    pub total: usize,
    pub completed: usize,
    /// Everything not completed, overdue included.
    pub pending: usize,
    pub overdue: usize,
}

pub fn goal_statistics(goals: &[Goal], now: DateTime<Utc>) -> GoalStatistics {
    let completed = goals.iter().filter(|goal| goal.is_completed).count();
    let overdue = goals.iter().filter(|goal| goal.is_overdue(now)).count();
    GoalStatistics {
        completed,
        in_progress: goals.len() - completed,
        overdue,
    }
}

pub fn reminder_statistics(reminders: &[Reminder], now: DateTime<Utc>) -> ReminderStatistics {
    let total = reminders.len();
    let completed = reminders
        .iter()
        .filter(|reminder| reminder.is_completed)
        .count();
    let overdue = reminders
        .iter()
        .filter(|reminder| reminder.is_overdue(now))
        .count();
    ReminderStatistics {
        total,
        completed,
        pending: total - completed,
        overdue,
    }
}

/// Mean progress across all goals; 0.0 for an empty collection.
pub fn completion_rate(goals: &[Goal]) -> f64 {
    if goals.is_empty() {
        return 0.0;
    }
    let total: f64 = goals.iter().map(|goal| goal.progress).sum();
    total / goals.len() as f64
}
