//! Reminder domain model.
//!
//! # Responsibility
//! - Define the scheduled, optionally recurring task record.
//! - Provide pure lifecycle transitions for completion and recurrence
//!   rollover.
//!
//! # Invariants
//! - `id` is stable and never reused for another reminder.
//! - `is_recurring == false` implies `recurrence_type == None`; the
//!   constructor derives one from the other.
//! - A recurring reminder never rests in the completed state: completing
//!   it rolls `scheduled_time` forward one recurrence unit and resets the
//!   completion fields in the same transition.
//! - `is_completed` and `is_enabled` are orthogonal; disabling alerts does
//!   not complete a reminder and vice versa.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a reminder.
pub type ReminderId = Uuid;

/// Recurrence period applied on completion rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceType {
    None,
    Daily,
    Weekly,
    Monthly,
}

impl RecurrenceType {
    /// Human-readable name used in exports.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

/// Fixed category set for reminders, with display tags like
/// [`GoalCategory`](crate::model::goal::GoalCategory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderCategory {
    Work,
    Health,
    Personal,
    Hobby,
    Exercise,
    Medication,
    Appointment,
    Habit,
}

impl ReminderCategory {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Health => "Health",
            Self::Personal => "Personal",
            Self::Hobby => "Hobby",
            Self::Exercise => "Exercise",
            Self::Medication => "Medication",
            Self::Appointment => "Appointment",
            Self::Habit => "Habit",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Work => "briefcase.fill",
            Self::Health => "heart.fill",
            Self::Personal => "person.fill",
            Self::Hobby => "star.fill",
            Self::Exercise => "figure.walk",
            Self::Medication => "pills.fill",
            Self::Appointment => "calendar",
            Self::Habit => "repeat",
        }
    }

    pub fn color_tag(self) -> &'static str {
        match self {
            Self::Work => "blue",
            Self::Health => "red",
            Self::Personal => "purple",
            Self::Hobby => "pink",
            Self::Exercise => "green",
            Self::Medication => "orange",
            Self::Appointment => "indigo",
            Self::Habit => "teal",
        }
    }
}

/// A scheduled, optionally recurring task notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable reminder ID, assigned at creation.
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    /// Point in time of the next (or only) occurrence.
    pub scheduled_time: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurrence_type: RecurrenceType,
    pub is_completed: bool,
    /// Whether alerts fire for this reminder; independent of completion.
    pub is_enabled: bool,
    pub category: ReminderCategory,
    /// Set once at creation, never mutated afterwards.
    pub created_date: DateTime<Utc>,
    /// Present exactly while the reminder is completed.
    pub completed_date: Option<DateTime<Utc>>,
    /// Identifier of the pending alert scheduled for this reminder, when
    /// one exists.
    pub notification_identifier: Option<String>,
}

impl Reminder {
    /// Creates a new enabled, not-completed reminder.
    ///
    /// `is_recurring` is derived from `recurrence_type`, keeping the two
    /// fields coherent by construction.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        scheduled_time: DateTime<Utc>,
        recurrence_type: RecurrenceType,
        category: ReminderCategory,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            scheduled_time,
            is_recurring: recurrence_type != RecurrenceType::None,
            recurrence_type,
            is_completed: false,
            is_enabled: true,
            category,
            created_date: now,
            completed_date: None,
            notification_identifier: None,
        }
    }

    /// Returns whether the reminder's occurrence has passed unhandled.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.scheduled_time < now
    }

    /// Signed time from `now` to the scheduled occurrence.
    pub fn time_until_due(&self, now: DateTime<Utc>) -> Duration {
        self.scheduled_time - now
    }

    /// Completes the reminder at `now`.
    ///
    /// A recurring reminder immediately rolls forward to its next
    /// occurrence and returns to the pending state; only non-recurring
    /// reminders rest in completed.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.is_completed = true;
        self.completed_date = Some(now);

        if self.is_recurring && self.recurrence_type != RecurrenceType::None {
            self.advance_occurrence();
        }
    }

    /// Advances `scheduled_time` by exactly one recurrence unit and resets
    /// completion state for the new occurrence.
    ///
    /// Monthly rollover is calendar-aware; a target month that cannot
    /// represent the date leaves `scheduled_time` unchanged.
    pub fn advance_occurrence(&mut self) {
        if !self.is_recurring {
            return;
        }

        self.scheduled_time = match self.recurrence_type {
            RecurrenceType::Daily => self.scheduled_time + Duration::days(1),
            RecurrenceType::Weekly => self.scheduled_time + Duration::weeks(1),
            RecurrenceType::Monthly => self
                .scheduled_time
                .checked_add_months(Months::new(1))
                .unwrap_or(self.scheduled_time),
            RecurrenceType::None => self.scheduled_time,
        };
        self.is_completed = false;
        self.completed_date = None;
    }

    /// Flips completion state.
    ///
    /// This is the only transition that moves a non-recurring reminder
    /// back from completed to pending.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        if self.is_completed {
            self.is_completed = false;
            self.completed_date = None;
        } else {
            self.mark_completed(now);
        }
    }

    /// Fixed demonstration reminders used as the first-run / recovery seed.
    pub fn sample_reminders(now: DateTime<Utc>) -> Vec<Reminder> {
        vec![
            Reminder::new(
                "Morning Workout",
                "30 minutes of cardio and strength training",
                at_time(now, 7, 0),
                RecurrenceType::Daily,
                ReminderCategory::Exercise,
                now,
            ),
            Reminder::new(
                "Take Vitamins",
                "Daily vitamin D and B12 supplements",
                at_time(now, 8, 30),
                RecurrenceType::Daily,
                ReminderCategory::Medication,
                now,
            ),
            Reminder::new(
                "Team Meeting",
                "Weekly team sync and project updates",
                at_time(now, 10, 0),
                RecurrenceType::Weekly,
                ReminderCategory::Work,
                now,
            ),
            Reminder::new(
                "Family Call",
                "Weekly check-in call with family",
                at_time(now, 19, 0),
                RecurrenceType::Weekly,
                ReminderCategory::Personal,
                now,
            ),
        ]
    }
}

/// Same day as `now`, at the given wall-clock hour and minute.
fn at_time(now: DateTime<Utc>, hour: u32, minute: u32) -> DateTime<Utc> {
    let time = chrono::NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(chrono::NaiveTime::MIN);
    now.date_naive().and_time(time).and_utc()
}
