//! Goal domain model.
//!
//! # Responsibility
//! - Define the long-term objective record tracked by the home screen.
//! - Provide pure lifecycle transitions for progress and completion.
//!
//! # Invariants
//! - `id` is stable and never reused for another goal.
//! - `progress` stays inside [0.0, 1.0]; reaching 1.0 through
//!   `update_progress` always completes the goal.
//! - `completed_date` is `Some` exactly while `is_completed` is true.
//! - `created_date` is set once at construction and never mutated.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a goal.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type GoalId = Uuid;

/// Progress value an uncompleted goal is capped at when completion is
/// reverted, so it never displays as 100%.
pub const REVERTED_PROGRESS_CAP: f64 = 0.99;

/// Fixed category set for goals.
///
/// Each category carries display tags (icon name and color) consumed by
/// hosting UIs; the core never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Health,
    Career,
    Personal,
    Fitness,
    Learning,
    Hobby,
}

impl GoalCategory {
    /// All categories in display order, for preference pickers.
    pub const ALL: [GoalCategory; 6] = [
        GoalCategory::Health,
        GoalCategory::Career,
        GoalCategory::Personal,
        GoalCategory::Fitness,
        GoalCategory::Learning,
        GoalCategory::Hobby,
    ];

    /// Human-readable name used in exports and stored preference lists.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Career => "Career",
            Self::Personal => "Personal",
            Self::Fitness => "Fitness",
            Self::Learning => "Learning",
            Self::Hobby => "Hobby",
        }
    }

    /// Symbolic icon tag for this category.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Health => "heart.fill",
            Self::Career => "briefcase.fill",
            Self::Personal => "person.fill",
            Self::Fitness => "figure.walk",
            Self::Learning => "book.fill",
            Self::Hobby => "star.fill",
        }
    }

    /// Color tag for this category.
    pub fn color_tag(self) -> &'static str {
        match self {
            Self::Health => "red",
            Self::Career => "blue",
            Self::Personal => "purple",
            Self::Fitness => "green",
            Self::Learning => "orange",
            Self::Hobby => "pink",
        }
    }
}

/// A tracked long-term objective with progress and a deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Stable goal ID, assigned at creation.
    pub id: GoalId,
    pub title: String,
    pub description: String,
    /// Point in time the goal should be achieved by.
    pub target_date: DateTime<Utc>,
    /// Fraction of the goal achieved, always within [0.0, 1.0].
    pub progress: f64,
    pub is_completed: bool,
    pub category: GoalCategory,
    /// Set once at creation, never mutated afterwards.
    pub created_date: DateTime<Utc>,
    /// Present exactly while the goal is completed.
    pub completed_date: Option<DateTime<Utc>>,
}

impl Goal {
    /// Creates a new goal with a generated stable ID and zero progress.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        target_date: DateTime<Utc>,
        category: GoalCategory,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            target_date,
            progress: 0.0,
            is_completed: false,
            category,
            created_date: now,
            completed_date: None,
        }
    }

    /// Returns whether the goal has missed its target date.
    ///
    /// Completed goals are never overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.target_date < now
    }

    /// Whole days from `now` until the target date (negative once passed).
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.target_date - now).num_days()
    }

    /// Marks the goal completed at `now`.
    ///
    /// # Invariants
    /// - `progress` becomes exactly 1.0.
    /// - `completed_date` is stamped with `now`.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.is_completed = true;
        self.progress = 1.0;
        self.completed_date = Some(now);
    }

    /// Reverts a completed goal back to in-progress.
    ///
    /// # Invariants
    /// - `completed_date` is cleared.
    /// - `progress` is capped at [`REVERTED_PROGRESS_CAP`] so an
    ///   uncompleted goal never reads as 100%.
    pub fn revert_completion(&mut self) {
        self.is_completed = false;
        self.completed_date = None;
        self.progress = self.progress.min(REVERTED_PROGRESS_CAP);
    }

    /// Stores `value` clamped to [0.0, 1.0].
    ///
    /// Reaching 1.0 on a not-yet-completed goal triggers
    /// [`Goal::mark_completed`]; lowering progress never un-completes.
    pub fn update_progress(&mut self, value: f64, now: DateTime<Utc>) {
        self.progress = value.clamp(0.0, 1.0);
        if self.progress >= 1.0 && !self.is_completed {
            self.mark_completed(now);
        }
    }

    /// Fixed demonstration goals used as the first-run / recovery seed.
    pub fn sample_goals(now: DateTime<Utc>) -> Vec<Goal> {
        let mut learn = Goal::new(
            "Learn Spanish",
            "Hold a ten-minute conversation without notes",
            months_from(now, 3),
            GoalCategory::Learning,
            now,
        );
        learn.progress = 0.6;

        let mut run = Goal::new(
            "Run a 10K",
            "Train up from 5K with three runs per week",
            months_from(now, 2),
            GoalCategory::Fitness,
            now,
        );
        run.progress = 0.3;

        let mut read = Goal::new(
            "Read 12 Books",
            "One book per month for a year",
            months_from(now, 12),
            GoalCategory::Personal,
            now,
        );
        read.progress = 0.4;

        vec![learn, run, read]
    }
}

/// `now` shifted forward by whole calendar months, falling back to `now`
/// when the target month cannot represent the date.
fn months_from(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_add_months(Months::new(months))
        .unwrap_or(now + Duration::days(30 * i64::from(months)))
}
