//! Onboarding application state.
//!
//! # Responsibility
//! - Track carousel step position and the answers collected along the way.
//! - On completion, merge the answers into stored preferences, schedule
//!   the motivation alert when requested, and persist the completed flag.
//!
//! # Invariants
//! - `current_step` always indexes into [`ONBOARDING_STEPS`].
//! - Advancing past the last step completes onboarding.

use crate::model::goal::GoalCategory;
use crate::notify::AlertScheduler;
use crate::repo::data_store::DataStore;
use crate::repo::slot_repo::SlotRepository;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::collections::BTreeSet;
use std::sync::Arc;

/// One onboarding carousel step. Copy is owned by the hosting UI; the
/// core only needs stable identifiers for step logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: &'static str,
}

/// Fixed step sequence.
pub const ONBOARDING_STEPS: &[OnboardingStep] = &[
    OnboardingStep {
        title: "Welcome to LifePulse",
        subtitle: "Your personal lifestyle companion",
        icon: "heart.fill",
    },
    OnboardingStep {
        title: "Set & Achieve Goals",
        subtitle: "Turn plans into progress",
        icon: "target",
    },
    OnboardingStep {
        title: "Smart Reminders",
        subtitle: "Never miss what matters",
        icon: "bell.fill",
    },
    OnboardingStep {
        title: "Daily Insights",
        subtitle: "Understand your progress",
        icon: "chart.line.uptrend.xyaxis",
    },
];

/// Onboarding flow state over injected persistence and alerts.
pub struct OnboardingService<R: SlotRepository, N: AlertScheduler> {
    store: DataStore<R>,
    alerts: Arc<N>,
    current_step: usize,
    user_name: String,
    selected_categories: BTreeSet<GoalCategory>,
    notifications_enabled: bool,
}

impl<R: SlotRepository, N: AlertScheduler> OnboardingService<R, N> {
    pub fn new(store: DataStore<R>, alerts: Arc<N>) -> Self {
        Self {
            store,
            alerts,
            current_step: 0,
            user_name: String::new(),
            selected_categories: BTreeSet::new(),
            notifications_enabled: true,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn current_onboarding_step(&self) -> OnboardingStep {
        ONBOARDING_STEPS[self.current_step.min(ONBOARDING_STEPS.len() - 1)]
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == ONBOARDING_STEPS.len() - 1
    }

    /// Fraction of the carousel walked through, in (0.0, 1.0].
    pub fn progress(&self) -> f64 {
        (self.current_step + 1) as f64 / ONBOARDING_STEPS.len() as f64
    }

    /// Advances one step; advancing past the last step completes
    /// onboarding.
    pub fn next_step(&mut self, now: DateTime<Utc>) {
        if self.current_step < ONBOARDING_STEPS.len() - 1 {
            self.current_step += 1;
        } else {
            self.complete_onboarding(now);
        }
    }

    pub fn previous_step(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    pub fn skip_to_end(&mut self) {
        self.current_step = ONBOARDING_STEPS.len() - 1;
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user_name = name.into();
    }

    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.notifications_enabled = enabled;
    }

    /// Adds or removes a category from the collected selection.
    pub fn toggle_category(&mut self, category: GoalCategory) {
        if !self.selected_categories.remove(&category) {
            self.selected_categories.insert(category);
        }
    }

    pub fn selected_categories(&self) -> &BTreeSet<GoalCategory> {
        &self.selected_categories
    }

    /// Whether the stored onboarding-completed flag is set.
    pub fn has_completed_onboarding(&self) -> bool {
        self.store.load_onboarding_completed()
    }

    /// Merges collected answers into stored preferences, schedules the
    /// motivation alert when notifications were accepted, and persists the
    /// completed flag.
    pub fn complete_onboarding(&mut self, now: DateTime<Utc>) {
        let mut preferences = self.store.load_preferences().value;
        preferences.user_name = self.user_name.clone();
        preferences.notifications_enabled = self.notifications_enabled;
        preferences.preferred_categories = self
            .selected_categories
            .iter()
            .map(|category| category.display_name().to_string())
            .collect();

        if let Err(err) = self.store.save_preferences(&preferences) {
            error!(
                "event=onboarding_complete module=service status=error error_code=save_failed error={err}"
            );
        }

        if self.notifications_enabled {
            if let Err(err) = self.alerts.schedule_daily_motivation(now) {
                error!(
                    "event=alert_schedule module=service status=error kind=motivation error={err}"
                );
            }
        }

        if let Err(err) = self.store.save_onboarding_completed(true) {
            error!(
                "event=onboarding_complete module=service status=error error_code=flag_save_failed error={err}"
            );
        }
        info!("event=onboarding_complete module=service status=ok");
    }

    /// Clears collected state and the stored flag, returning the flow to
    /// its first-run state. Used after account deletion.
    pub fn reset_onboarding(&mut self) {
        self.current_step = 0;
        self.user_name.clear();
        self.selected_categories.clear();
        self.notifications_enabled = true;

        if let Err(err) = self.store.save_onboarding_completed(false) {
            error!(
                "event=onboarding_reset module=service status=error error_code=flag_save_failed error={err}"
            );
        }
    }
}
