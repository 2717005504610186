//! Home application state.
//!
//! # Responsibility
//! - Own the authoritative in-memory goal and reminder working set for the
//!   session.
//! - Sequence every mutation as: mutate in memory, persist the full
//!   collection, perform the matching alert side effect.
//! - Expose derived views (filtered lists, today/upcoming, statistics) as
//!   pure functions of current state.
//!
//! # Invariants
//! - Persistence or alert failures never roll back the in-memory change;
//!   they are logged and the operation still completes for the caller.
//! - Editing a reminder always cancels its previous alert before
//!   conditionally rescheduling, so edits never leave duplicate alerts.
//! - Derived views never mutate state and never touch the store.

use crate::model::goal::{Goal, GoalId};
use crate::model::reminder::{Reminder, ReminderId};
use crate::notify::{reminder_alert_identifier, AlertScheduler};
use crate::repo::data_store::DataStore;
use crate::repo::slot_repo::SlotRepository;
use crate::service::stats::{
    completion_rate, goal_statistics, reminder_statistics, GoalStatistics, ReminderStatistics,
};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use log::{error, info, warn};
use std::sync::Arc;

/// List filter applied on top of the search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    All,
    /// Not completed; for reminders this additionally requires enabled.
    Active,
    Completed,
    Overdue,
}

/// Query options for the filtered goal/reminder views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive substring matched against title and description.
    /// Empty matches everything.
    pub search: String,
    pub filter: FilterKind,
}

/// Session-scoped home state over injected persistence and alerts.
pub struct HomeService<R: SlotRepository, N: AlertScheduler> {
    store: DataStore<R>,
    alerts: Arc<N>,
    goals: Vec<Goal>,
    reminders: Vec<Reminder>,
}

impl<R: SlotRepository, N: AlertScheduler> HomeService<R, N> {
    /// Creates the service and loads both working collections.
    pub fn new(store: DataStore<R>, alerts: Arc<N>, now: DateTime<Utc>) -> Self {
        let goals = store.load_goals(now);
        let reminders = store.load_reminders(now);
        info!(
            "event=home_load module=service status=ok goals={} goal_source={:?} reminders={} reminder_source={:?}",
            goals.value.len(),
            goals.source,
            reminders.value.len(),
            reminders.source
        );
        Self {
            store,
            alerts,
            goals: goals.value,
            reminders: reminders.value,
        }
    }

    /// Current in-memory goal collection.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Current in-memory reminder collection.
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Reloads both collections from the store, discarding in-memory
    /// state.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.goals = self.store.load_goals(now).value;
        self.reminders = self.store.load_reminders(now).value;
    }

    // --- Goal mutations ---

    /// Adds a goal and schedules its deadline alert.
    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal.clone());
        self.persist_goals();
        self.schedule_goal_deadline(&goal);
    }

    /// Replaces a goal by id and re-syncs its deadline alert.
    ///
    /// Unknown ids are logged no-ops.
    pub fn update_goal(&mut self, updated: Goal) {
        let Some(index) = self.goals.iter().position(|goal| goal.id == updated.id) else {
            warn!(
                "event=goal_update module=service status=skipped goal_id={} error_code=goal_not_found",
                updated.id
            );
            return;
        };

        self.goals[index] = updated.clone();
        self.persist_goals();

        self.alerts.cancel_goal_deadline(updated.id);
        if !updated.is_completed {
            self.schedule_goal_deadline(&updated);
        }
    }

    /// Removes a goal and its deadline alert.
    pub fn delete_goal(&mut self, id: GoalId) {
        self.goals.retain(|goal| goal.id != id);
        self.persist_goals();
        self.alerts.cancel_goal_deadline(id);
    }

    /// Flips a goal's completion state.
    pub fn toggle_goal_completion(&mut self, id: GoalId, now: DateTime<Utc>) {
        let Some(goal) = self.goals.iter_mut().find(|goal| goal.id == id) else {
            warn!(
                "event=goal_toggle module=service status=skipped goal_id={id} error_code=goal_not_found"
            );
            return;
        };

        if goal.is_completed {
            goal.revert_completion();
        } else {
            goal.mark_completed(now);
        }
        self.persist_goals();
    }

    /// Applies a clamped progress update; reaching 1.0 completes the goal.
    pub fn update_goal_progress(&mut self, id: GoalId, value: f64, now: DateTime<Utc>) {
        let Some(goal) = self.goals.iter_mut().find(|goal| goal.id == id) else {
            warn!(
                "event=goal_progress module=service status=skipped goal_id={id} error_code=goal_not_found"
            );
            return;
        };

        goal.update_progress(value, now);
        self.persist_goals();
    }

    // --- Reminder mutations ---

    /// Adds a reminder, scheduling its alert when enabled.
    pub fn add_reminder(&mut self, mut reminder: Reminder) {
        reminder.notification_identifier = if reminder.is_enabled {
            Some(reminder_alert_identifier(reminder.id))
        } else {
            None
        };

        self.reminders.push(reminder.clone());
        self.persist_reminders();

        if reminder.is_enabled {
            self.schedule_reminder_alert(&reminder);
        }
    }

    /// Replaces a reminder by id and re-syncs its alert.
    ///
    /// The previous alert is always cancelled first so edits never leave a
    /// duplicate behind.
    pub fn update_reminder(&mut self, mut updated: Reminder) {
        let Some(index) = self
            .reminders
            .iter()
            .position(|reminder| reminder.id == updated.id)
        else {
            warn!(
                "event=reminder_update module=service status=skipped reminder_id={} error_code=reminder_not_found",
                updated.id
            );
            return;
        };

        updated.notification_identifier = if updated.is_enabled {
            Some(reminder_alert_identifier(updated.id))
        } else {
            None
        };

        self.reminders[index] = updated.clone();
        self.persist_reminders();

        self.alerts.cancel_reminder(updated.id);
        if updated.is_enabled {
            self.schedule_reminder_alert(&updated);
        }
    }

    /// Removes a reminder and its alert.
    pub fn delete_reminder(&mut self, id: ReminderId) {
        self.reminders.retain(|reminder| reminder.id != id);
        self.persist_reminders();
        self.alerts.cancel_reminder(id);
    }

    /// Flips a reminder's completion state, rolling recurring reminders
    /// forward to their next occurrence.
    pub fn toggle_reminder_completion(&mut self, id: ReminderId, now: DateTime<Utc>) {
        let Some(reminder) = self
            .reminders
            .iter_mut()
            .find(|reminder| reminder.id == id)
        else {
            warn!(
                "event=reminder_toggle module=service status=skipped reminder_id={id} error_code=reminder_not_found"
            );
            return;
        };

        reminder.toggle(now);
        self.persist_reminders();
    }

    /// Flips a reminder's alert enablement, scheduling or cancelling to
    /// match.
    pub fn toggle_reminder_enabled(&mut self, id: ReminderId) {
        let Some(index) = self
            .reminders
            .iter()
            .position(|reminder| reminder.id == id)
        else {
            warn!(
                "event=reminder_enable module=service status=skipped reminder_id={id} error_code=reminder_not_found"
            );
            return;
        };

        let enabled = !self.reminders[index].is_enabled;
        self.reminders[index].is_enabled = enabled;
        self.reminders[index].notification_identifier = if enabled {
            Some(reminder_alert_identifier(id))
        } else {
            None
        };
        let reminder = self.reminders[index].clone();
        self.persist_reminders();

        if enabled {
            self.schedule_reminder_alert(&reminder);
        } else {
            self.alerts.cancel_reminder(id);
        }
    }

    // --- Derived views ---

    /// Goals matching the query, incomplete first, then by ascending
    /// target date.
    pub fn filtered_goals(&self, query: &ListQuery, now: DateTime<Utc>) -> Vec<Goal> {
        let needle = query.search.to_lowercase();
        let mut matched: Vec<Goal> = self
            .goals
            .iter()
            .filter(|goal| {
                let matches_search = needle.is_empty()
                    || goal.title.to_lowercase().contains(&needle)
                    || goal.description.to_lowercase().contains(&needle);
                let matches_filter = match query.filter {
                    FilterKind::All => true,
                    FilterKind::Active => !goal.is_completed,
                    FilterKind::Completed => goal.is_completed,
                    FilterKind::Overdue => goal.is_overdue(now),
                };
                matches_search && matches_filter
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            a.is_completed
                .cmp(&b.is_completed)
                .then(a.target_date.cmp(&b.target_date))
        });
        matched
    }

    /// Reminders matching the query, incomplete first, then by ascending
    /// scheduled time.
    pub fn filtered_reminders(&self, query: &ListQuery, now: DateTime<Utc>) -> Vec<Reminder> {
        let needle = query.search.to_lowercase();
        let mut matched: Vec<Reminder> = self
            .reminders
            .iter()
            .filter(|reminder| {
                let matches_search = needle.is_empty()
                    || reminder.title.to_lowercase().contains(&needle)
                    || reminder.description.to_lowercase().contains(&needle);
                let matches_filter = match query.filter {
                    FilterKind::All => true,
                    FilterKind::Active => !reminder.is_completed && reminder.is_enabled,
                    FilterKind::Completed => reminder.is_completed,
                    FilterKind::Overdue => reminder.is_overdue(now),
                };
                matches_search && matches_filter
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            a.is_completed
                .cmp(&b.is_completed)
                .then(a.scheduled_time.cmp(&b.scheduled_time))
        });
        matched
    }

    /// Not-completed reminders scheduled within `now`'s calendar day,
    /// ascending by time.
    pub fn today_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let day_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + Duration::days(1);

        let mut today: Vec<Reminder> = self
            .reminders
            .iter()
            .filter(|reminder| {
                !reminder.is_completed
                    && reminder.scheduled_time >= day_start
                    && reminder.scheduled_time < day_end
            })
            .cloned()
            .collect();
        today.sort_by(|a, b| a.scheduled_time.cmp(&b.scheduled_time));
        today
    }

    /// Incomplete goals due within the next seven days (overdue included),
    /// ascending by target date.
    pub fn upcoming_goals(&self, now: DateTime<Utc>) -> Vec<Goal> {
        let horizon = now + Duration::weeks(1);

        let mut upcoming: Vec<Goal> = self
            .goals
            .iter()
            .filter(|goal| !goal.is_completed && goal.target_date <= horizon)
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| a.target_date.cmp(&b.target_date));
        upcoming
    }

    pub fn goal_statistics(&self, now: DateTime<Utc>) -> GoalStatistics {
        goal_statistics(&self.goals, now)
    }

    pub fn reminder_statistics(&self, now: DateTime<Utc>) -> ReminderStatistics {
        reminder_statistics(&self.reminders, now)
    }

    /// Mean progress across all goals; 0.0 with no goals.
    pub fn overall_progress(&self) -> f64 {
        completion_rate(&self.goals)
    }

    // --- Internal helpers ---

    fn persist_goals(&self) {
        if let Err(err) = self.store.save_goals(&self.goals) {
            error!(
                "event=goal_save module=service status=error error_code=save_failed error={err}"
            );
        }
    }

    fn persist_reminders(&self) {
        if let Err(err) = self.store.save_reminders(&self.reminders) {
            error!(
                "event=reminder_save module=service status=error error_code=save_failed error={err}"
            );
        }
    }

    fn schedule_goal_deadline(&self, goal: &Goal) {
        if let Err(err) = self.alerts.schedule_goal_deadline(goal) {
            error!(
                "event=alert_schedule module=service status=error kind=goal_deadline goal_id={} error={err}",
                goal.id
            );
        }
    }

    fn schedule_reminder_alert(&self, reminder: &Reminder) {
        if let Err(err) = self.alerts.schedule_reminder(reminder) {
            error!(
                "event=alert_schedule module=service status=error kind=reminder reminder_id={} error={err}",
                reminder.id
            );
        }
    }
}
