//! Settings application state.
//!
//! # Responsibility
//! - Own the loaded preferences record and persist every change.
//! - Keep the daily motivation alert in sync with the notification
//!   preferences.
//! - Drive the two-phase account reset and the plain-text data export.
//!
//! # Invariants
//! - Preferences are replaced wholesale on every save.
//! - A completed reset clears all slots, cancels every pending alert, and
//!   emits exactly one [`AppEvent::AccountDeleted`].
//! - `complete_reset` only acts after `begin_reset` marked the operation
//!   in progress.

use crate::event::{AppEvent, EventBus};
use crate::model::goal::GoalCategory;
use crate::model::preferences::UserPreferences;
use crate::notify::AlertScheduler;
use crate::repo::data_store::DataStore;
use crate::repo::slot_repo::SlotRepository;
use crate::service::stats::{
    completion_rate, goal_statistics, reminder_statistics, GoalStatistics, ReminderStatistics,
};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::fmt::Write as _;
use std::sync::Arc;

/// Combined statistics over the durable collections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsSnapshot {
    pub goals: GoalStatistics,
    pub reminders: ReminderStatistics,
    pub completion_rate: f64,
}

/// Settings state over injected persistence, alerts and the event bus.
pub struct SettingsService<R: SlotRepository, N: AlertScheduler> {
    store: DataStore<R>,
    alerts: Arc<N>,
    events: Arc<EventBus>,
    preferences: UserPreferences,
    reset_in_progress: bool,
}

impl<R: SlotRepository, N: AlertScheduler> SettingsService<R, N> {
    /// Creates the service and loads the stored preferences.
    pub fn new(store: DataStore<R>, alerts: Arc<N>, events: Arc<EventBus>) -> Self {
        let preferences = store.load_preferences().value;
        Self {
            store,
            alerts,
            events,
            preferences,
            reset_in_progress: false,
        }
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn is_reset_in_progress(&self) -> bool {
        self.reset_in_progress
    }

    /// Persists the current preferences and re-syncs the motivation alert:
    /// notifications off cancels everything, motivation on (re)schedules
    /// the daily alert.
    pub fn save_preferences(&self, now: DateTime<Utc>) {
        if let Err(err) = self.store.save_preferences(&self.preferences) {
            error!(
                "event=preferences_save module=service status=error error_code=save_failed error={err}"
            );
        }

        if self.preferences.notifications_enabled {
            if self.preferences.motivational_notifications_enabled {
                if let Err(err) = self.alerts.schedule_daily_motivation(now) {
                    error!(
                        "event=alert_schedule module=service status=error kind=motivation error={err}"
                    );
                }
            }
        } else {
            self.alerts.cancel_all();
        }
    }

    pub fn update_user_name(&mut self, name: impl Into<String>, now: DateTime<Utc>) {
        self.preferences.user_name = name.into();
        self.save_preferences(now);
    }

    pub fn toggle_notifications(&mut self, now: DateTime<Utc>) {
        self.preferences.notifications_enabled = !self.preferences.notifications_enabled;
        self.save_preferences(now);
    }

    pub fn toggle_motivational_notifications(&mut self, now: DateTime<Utc>) {
        self.preferences.motivational_notifications_enabled =
            !self.preferences.motivational_notifications_enabled;
        self.save_preferences(now);
    }

    pub fn toggle_dark_mode(&mut self, now: DateTime<Utc>) {
        self.preferences.dark_mode_enabled = !self.preferences.dark_mode_enabled;
        self.save_preferences(now);
    }

    /// Adds a category to the preferred list; duplicates are ignored.
    pub fn add_preferred_category(&mut self, category: GoalCategory, now: DateTime<Utc>) {
        let name = category.display_name().to_string();
        if self.preferences.preferred_categories.contains(&name) {
            return;
        }
        self.preferences.preferred_categories.push(name);
        self.save_preferences(now);
    }

    pub fn remove_preferred_category(&mut self, category: GoalCategory, now: DateTime<Utc>) {
        let name = category.display_name();
        self.preferences
            .preferred_categories
            .retain(|stored| stored != name);
        self.save_preferences(now);
    }

    // --- Account reset (two-phase) ---

    /// Marks a reset as in progress, giving the caller a window to run its
    /// transition before the irreversible wipe.
    pub fn begin_reset(&mut self) {
        self.reset_in_progress = true;
        info!("event=reset module=service status=start");
    }

    /// Abandons an in-progress reset without touching any data.
    pub fn cancel_reset(&mut self) {
        self.reset_in_progress = false;
    }

    /// Performs the irreversible wipe: cancels all alerts, clears every
    /// slot, restores default preferences, and emits one account-deleted
    /// event.
    ///
    /// Requires a preceding [`SettingsService::begin_reset`]; otherwise a
    /// logged no-op.
    pub fn complete_reset(&mut self) {
        if !self.reset_in_progress {
            warn!("event=reset module=service status=skipped error_code=reset_not_started");
            return;
        }

        self.alerts.cancel_all();
        if let Err(err) = self.store.reset_all() {
            error!("event=reset module=service status=error error_code=wipe_failed error={err}");
        }
        self.preferences = UserPreferences::default();
        self.reset_in_progress = false;

        self.events.emit(&AppEvent::AccountDeleted);
        info!("event=reset module=service status=ok");
    }

    // --- Read-only views ---

    /// Human-readable dump of all goals and reminders. No re-import.
    pub fn export_data(&self, now: DateTime<Utc>) -> String {
        let goals = self.store.load_goals(now).value;
        let reminders = self.store.load_reminders(now).value;

        let mut out = String::new();
        let _ = writeln!(out, "LifePulse Data Export");
        let _ = writeln!(out, "Generated on: {}", now.format("%Y-%m-%d %H:%M UTC"));
        let _ = writeln!(out);

        let _ = writeln!(out, "GOALS ({}):", goals.len());
        let _ = writeln!(out, "==================");
        for goal in &goals {
            let _ = writeln!(out, "- {}", goal.title);
            let _ = writeln!(out, "  Description: {}", goal.description);
            let _ = writeln!(out, "  Category: {}", goal.category.display_name());
            let _ = writeln!(out, "  Progress: {}%", (goal.progress * 100.0).round() as i64);
            let _ = writeln!(out, "  Target Date: {}", goal.target_date.format("%Y-%m-%d"));
            let _ = writeln!(
                out,
                "  Status: {}",
                if goal.is_completed {
                    "Completed"
                } else {
                    "In Progress"
                }
            );
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "REMINDERS ({}):", reminders.len());
        let _ = writeln!(out, "=====================");
        for reminder in &reminders {
            let _ = writeln!(out, "- {}", reminder.title);
            let _ = writeln!(out, "  Description: {}", reminder.description);
            let _ = writeln!(out, "  Category: {}", reminder.category.display_name());
            let _ = writeln!(
                out,
                "  Scheduled: {}",
                reminder.scheduled_time.format("%Y-%m-%d %H:%M")
            );
            let _ = writeln!(
                out,
                "  Recurring: {}",
                if reminder.is_recurring {
                    reminder.recurrence_type.display_name()
                } else {
                    "No"
                }
            );
            let _ = writeln!(
                out,
                "  Status: {}",
                if reminder.is_completed {
                    "Completed"
                } else {
                    "Pending"
                }
            );
            let _ = writeln!(out);
        }

        out
    }

    /// Statistics over the durable collections, for the settings screen.
    pub fn statistics_snapshot(&self, now: DateTime<Utc>) -> StatisticsSnapshot {
        let goals = self.store.load_goals(now).value;
        let reminders = self.store.load_reminders(now).value;
        StatisticsSnapshot {
            goals: goal_statistics(&goals, now),
            reminders: reminder_statistics(&reminders, now),
            completion_rate: completion_rate(&goals),
        }
    }
}
