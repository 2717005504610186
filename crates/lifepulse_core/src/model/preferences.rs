//! User preferences record.
//!
//! One record per installation, replaced wholesale on every save.
//! `Default` doubles as the first-run / recovery fallback.

use serde::{Deserialize, Serialize};

/// Installation-wide user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Master switch for all local alerts.
    pub notifications_enabled: bool,
    /// Daily motivation alert, only meaningful while notifications are on.
    pub motivational_notifications_enabled: bool,
    pub dark_mode_enabled: bool,
    pub user_name: String,
    /// Display names of the goal categories the user cares about.
    pub preferred_categories: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            motivational_notifications_enabled: true,
            dark_mode_enabled: false,
            user_name: String::new(),
            preferred_categories: Vec::new(),
        }
    }
}
