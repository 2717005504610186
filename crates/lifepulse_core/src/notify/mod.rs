//! Local alert scheduling contracts.
//!
//! # Responsibility
//! - Define the schedule/cancel contract for point-in-time alerts keyed by
//!   entity identity.
//! - Fix the identity scheme shared by every implementation: reminder
//!   alerts use the reminder's own uuid string, goal deadline alerts use a
//!   `goal_` prefix, and the daily motivation alert uses one constant
//!   identifier.
//!
//! # Invariants
//! - One pending alert per identity; scheduling the same identity again
//!   replaces the previous request, so callers cancel before rescheduling
//!   when an entity's identity may have changed.
//! - Cancellation is idempotent.
//! - Schedulers are side-effect only; `pending_alerts` exists for
//!   diagnostics and is never consumed by core logic.

use crate::model::goal::{Goal, GoalId};
use crate::model::reminder::{Reminder, ReminderId};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod local_center;

pub use local_center::LocalAlertCenter;

/// Identifier prefix distinguishing goal deadline alerts from reminder
/// alerts in the shared alert store.
pub const GOAL_ALERT_PREFIX: &str = "goal_";

/// Fixed identifier of the single daily motivation alert.
pub const DAILY_MOTIVATION_IDENTIFIER: &str = "daily_motivation";

/// Alert identifier for a reminder.
pub fn reminder_alert_identifier(id: ReminderId) -> String {
    id.to_string()
}

/// Alert identifier for a goal deadline.
pub fn goal_alert_identifier(id: GoalId) -> String {
    format!("{GOAL_ALERT_PREFIX}{id}")
}

/// Kind of pending alert, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Reminder,
    GoalDeadline,
    Motivation,
}

/// One pending alert registration.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRequest {
    pub identifier: String,
    pub title: String,
    pub body: String,
    /// Next trigger time.
    pub trigger_at: DateTime<Utc>,
    /// Whether the alert re-fires on its period after triggering.
    pub repeats: bool,
    pub kind: AlertKind,
}

pub type AlertResult<T> = Result<T, AlertError>;

/// Alert registration failure. Reported, never fatal to callers.
#[derive(Debug)]
pub enum AlertError {
    /// The backing alert store rejected the registration.
    RegistrationFailed(String),
}

impl Display for AlertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RegistrationFailed(reason) => {
                write!(f, "alert registration failed: {reason}")
            }
        }
    }
}

impl Error for AlertError {}

/// Schedule/cancel contract for local alerts.
///
/// This is the injectable coordination seam: services depend on this
/// trait, never on a concrete alert store.
pub trait AlertScheduler {
    /// Schedules the reminder's alert at its scheduled time.
    ///
    /// Precondition: the caller has checked `is_enabled`; this method does
    /// not.
    fn schedule_reminder(&self, reminder: &Reminder) -> AlertResult<()>;

    /// Cancels a reminder's pending alert, if any.
    fn cancel_reminder(&self, id: ReminderId);

    /// Schedules a one-shot alert one day before the goal's target date.
    /// No-op for completed goals.
    fn schedule_goal_deadline(&self, goal: &Goal) -> AlertResult<()>;

    /// Cancels a goal's pending deadline alert, if any.
    fn cancel_goal_deadline(&self, id: GoalId);

    /// Schedules the single recurring daily motivation alert.
    fn schedule_daily_motivation(&self, now: DateTime<Utc>) -> AlertResult<()>;

    /// Clears every pending alert. Used on full data reset.
    fn cancel_all(&self);

    /// Snapshot of currently pending alerts, for diagnostics only.
    fn pending_alerts(&self) -> Vec<AlertRequest>;
}
