//! Typed data store over the four named slots.
//!
//! # Responsibility
//! - Encode/decode goal, reminder, preference and onboarding slots as JSON
//!   payload text.
//! - Apply the seed-fallback policy: the application always has non-empty
//!   demonstration data on first run or after payload corruption.
//!
//! # Invariants
//! - Loads never fail and never return an empty collection on failure;
//!   callers learn what happened through [`LoadSource`].
//! - Saves serialize the full collection and overwrite the slot; a failed
//!   save leaves in-memory state untouched.
//! - Saving a just-loaded collection rewrites byte-identical payload text.

use crate::model::goal::Goal;
use crate::model::preferences::UserPreferences;
use crate::model::reminder::Reminder;
use crate::repo::slot_repo::{RepoResult, SlotRepository};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Slot holding the goal collection.
pub const GOALS_SLOT: &str = "lifepulse.goals";
/// Slot holding the reminder collection.
pub const REMINDERS_SLOT: &str = "lifepulse.reminders";
/// Slot holding the single preferences record.
pub const PREFERENCES_SLOT: &str = "lifepulse.preferences";
/// Slot holding the onboarding-completed flag.
pub const ONBOARDING_SLOT: &str = "lifepulse.onboarding_completed";

/// Where a loaded value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from a stored payload.
    Stored,
    /// Slot was absent (first run); seed/default data returned.
    Seeded,
    /// Slot existed but could not be read or decoded; seed/default data
    /// returned in its place.
    Recovered,
}

/// A loaded value plus its provenance.
///
/// Hosts that want to surface recovery can inspect `source`; callers that
/// ignore it get the original silent-fallback behavior.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub value: T,
    pub source: LoadSource,
}

/// Typed store for all durable LifePulse state.
pub struct DataStore<R: SlotRepository> {
    slots: R,
}

impl<R: SlotRepository> DataStore<R> {
    pub fn new(slots: R) -> Self {
        Self { slots }
    }

    /// Loads the goal collection, seeding sample goals when the slot is
    /// absent or unreadable.
    pub fn load_goals(&self, now: DateTime<Utc>) -> Loaded<Vec<Goal>> {
        self.load_with_fallback(GOALS_SLOT, || Goal::sample_goals(now))
    }

    /// Persists the full goal collection.
    pub fn save_goals(&self, goals: &[Goal]) -> RepoResult<()> {
        self.save(GOALS_SLOT, &goals)
    }

    /// Loads the reminder collection, seeding sample reminders when the
    /// slot is absent or unreadable.
    pub fn load_reminders(&self, now: DateTime<Utc>) -> Loaded<Vec<Reminder>> {
        self.load_with_fallback(REMINDERS_SLOT, || Reminder::sample_reminders(now))
    }

    /// Persists the full reminder collection.
    pub fn save_reminders(&self, reminders: &[Reminder]) -> RepoResult<()> {
        self.save(REMINDERS_SLOT, &reminders)
    }

    /// Loads preferences, defaulting when absent or unreadable.
    pub fn load_preferences(&self) -> Loaded<UserPreferences> {
        self.load_with_fallback(PREFERENCES_SLOT, UserPreferences::default)
    }

    /// Replaces the preferences record wholesale.
    pub fn save_preferences(&self, preferences: &UserPreferences) -> RepoResult<()> {
        self.save(PREFERENCES_SLOT, preferences)
    }

    /// Reads the onboarding-completed flag; absent means not completed.
    pub fn load_onboarding_completed(&self) -> bool {
        self.load_with_fallback(ONBOARDING_SLOT, || false).value
    }

    /// Stores the onboarding-completed flag.
    pub fn save_onboarding_completed(&self, completed: bool) -> RepoResult<()> {
        self.save(ONBOARDING_SLOT, &completed)
    }

    /// Clears every slot unconditionally. Used for account deletion.
    pub fn reset_all(&self) -> RepoResult<()> {
        self.slots.clear_all_slots()?;
        info!("event=store_reset module=repo status=ok");
        Ok(())
    }

    fn save<T: Serialize>(&self, slot: &str, value: &T) -> RepoResult<()> {
        let payload = serde_json::to_string(value)?;
        self.slots.write_slot(slot, &payload)?;
        Ok(())
    }

    fn load_with_fallback<T: DeserializeOwned>(
        &self,
        slot: &str,
        fallback: impl FnOnce() -> T,
    ) -> Loaded<T> {
        let payload = match self.slots.read_slot(slot) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                info!("event=store_load module=repo status=seeded slot={slot}");
                return Loaded {
                    value: fallback(),
                    source: LoadSource::Seeded,
                };
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=recovered slot={slot} error_code=slot_read_failed error={err}"
                );
                return Loaded {
                    value: fallback(),
                    source: LoadSource::Recovered,
                };
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => Loaded {
                value,
                source: LoadSource::Stored,
            },
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=recovered slot={slot} error_code=slot_decode_failed error={err}"
                );
                Loaded {
                    value: fallback(),
                    source: LoadSource::Recovered,
                }
            }
        }
    }
}
