//! Core domain logic for LifePulse.
//! This crate is the single source of truth for goal/reminder business
//! invariants; hosting UIs render derived state and call mutations.

pub mod db;
pub mod event;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use event::{AppEvent, EventBus};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::goal::{Goal, GoalCategory, GoalId};
pub use model::preferences::UserPreferences;
pub use model::reminder::{RecurrenceType, Reminder, ReminderCategory, ReminderId};
pub use notify::{
    AlertKind, AlertRequest, AlertScheduler, LocalAlertCenter, DAILY_MOTIVATION_IDENTIFIER,
};
pub use repo::data_store::{DataStore, LoadSource, Loaded};
pub use repo::slot_repo::{RepoError, RepoResult, SlotRepository, SqliteSlotRepository};
pub use service::home_service::{FilterKind, HomeService, ListQuery};
pub use service::onboarding_service::{OnboardingService, ONBOARDING_STEPS};
pub use service::settings_service::{SettingsService, StatisticsSnapshot};
pub use service::stats::{GoalStatistics, ReminderStatistics};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
