//! In-process alert center.
//!
//! Keeps pending alert requests in a map keyed by identifier, mirroring
//! how a platform alert store replaces a request scheduled under an
//! existing identifier. Interior mutability lets services share one handle
//! behind `Arc`.

use super::{
    goal_alert_identifier, reminder_alert_identifier, AlertKind, AlertRequest, AlertResult,
    AlertScheduler, DAILY_MOTIVATION_IDENTIFIER,
};
use crate::model::goal::{Goal, GoalId};
use crate::model::reminder::{RecurrenceType, Reminder, ReminderId};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use log::info;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Hour of day (UTC) the daily motivation alert fires at.
const MOTIVATION_HOUR: u32 = 9;

const MOTIVATIONAL_MESSAGES: &[&str] = &[
    "Keep pushing towards your goals!",
    "Every small step counts!",
    "You're making great progress!",
    "Stay focused on your dreams!",
    "Believe in yourself!",
];

/// In-process [`AlertScheduler`] implementation.
#[derive(Default)]
pub struct LocalAlertCenter {
    pending: Mutex<BTreeMap<String, AlertRequest>>,
}

impl LocalAlertCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, AlertRequest>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AlertScheduler for LocalAlertCenter {
    fn schedule_reminder(&self, reminder: &Reminder) -> AlertResult<()> {
        let body = if reminder.description.is_empty() {
            "Time for your reminder!".to_string()
        } else {
            reminder.description.clone()
        };

        let request = AlertRequest {
            identifier: reminder_alert_identifier(reminder.id),
            title: reminder.title.clone(),
            body,
            trigger_at: reminder.scheduled_time,
            repeats: reminder.is_recurring && reminder.recurrence_type != RecurrenceType::None,
            kind: AlertKind::Reminder,
        };

        info!(
            "event=alert_schedule module=notify status=ok kind=reminder identifier={} repeats={}",
            request.identifier, request.repeats
        );
        self.lock().insert(request.identifier.clone(), request);
        Ok(())
    }

    fn cancel_reminder(&self, id: ReminderId) {
        self.lock().remove(&reminder_alert_identifier(id));
    }

    fn schedule_goal_deadline(&self, goal: &Goal) -> AlertResult<()> {
        if goal.is_completed {
            return Ok(());
        }

        let request = AlertRequest {
            identifier: goal_alert_identifier(goal.id),
            title: "Goal Deadline Approaching".to_string(),
            body: format!("Your goal '{}' is due soon!", goal.title),
            trigger_at: goal.target_date - Duration::days(1),
            repeats: false,
            kind: AlertKind::GoalDeadline,
        };

        info!(
            "event=alert_schedule module=notify status=ok kind=goal_deadline identifier={}",
            request.identifier
        );
        self.lock().insert(request.identifier.clone(), request);
        Ok(())
    }

    fn cancel_goal_deadline(&self, id: GoalId) {
        self.lock().remove(&goal_alert_identifier(id));
    }

    fn schedule_daily_motivation(&self, now: DateTime<Utc>) -> AlertResult<()> {
        let fire_time =
            NaiveTime::from_hms_opt(MOTIVATION_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
        let today_fire = now.date_naive().and_time(fire_time).and_utc();
        let trigger_at = if today_fire > now {
            today_fire
        } else {
            today_fire + Duration::days(1)
        };

        // Day-indexed rotation keeps message choice deterministic.
        let message_index = now.ordinal0() as usize % MOTIVATIONAL_MESSAGES.len();

        let request = AlertRequest {
            identifier: DAILY_MOTIVATION_IDENTIFIER.to_string(),
            title: "Daily Motivation".to_string(),
            body: MOTIVATIONAL_MESSAGES[message_index].to_string(),
            trigger_at,
            repeats: true,
            kind: AlertKind::Motivation,
        };

        info!("event=alert_schedule module=notify status=ok kind=motivation");
        self.lock().insert(request.identifier.clone(), request);
        Ok(())
    }

    fn cancel_all(&self) {
        self.lock().clear();
        info!("event=alert_cancel_all module=notify status=ok");
    }

    fn pending_alerts(&self) -> Vec<AlertRequest> {
        self.lock().values().cloned().collect()
    }
}
