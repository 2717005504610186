use chrono::{DateTime, Duration, TimeZone, Utc};
use lifepulse_core::db::open_db_in_memory;
use lifepulse_core::notify::{goal_alert_identifier, reminder_alert_identifier};
use lifepulse_core::{
    AlertScheduler, DataStore, FilterKind, Goal, GoalCategory, HomeService, ListQuery,
    LocalAlertCenter, RecurrenceType, Reminder, ReminderCategory, SqliteSlotRepository,
};
use rusqlite::Connection;
use std::sync::Arc;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}

/// Home service over an empty store, so tests control every entity.
fn empty_home<'conn>(
    conn: &'conn Connection,
    alerts: &Arc<LocalAlertCenter>,
    now: DateTime<Utc>,
) -> HomeService<SqliteSlotRepository<'conn>, LocalAlertCenter> {
    let setup = DataStore::new(SqliteSlotRepository::try_new(conn).unwrap());
    setup.save_goals(&[]).unwrap();
    setup.save_reminders(&[]).unwrap();

    HomeService::new(
        DataStore::new(SqliteSlotRepository::try_new(conn).unwrap()),
        Arc::clone(alerts),
        now,
    )
}

fn goal(title: &str, target: DateTime<Utc>, now: DateTime<Utc>) -> Goal {
    Goal::new(title, "", target, GoalCategory::Personal, now)
}

fn reminder(
    title: &str,
    scheduled: DateTime<Utc>,
    recurrence: RecurrenceType,
    now: DateTime<Utc>,
) -> Reminder {
    Reminder::new(title, "", scheduled, recurrence, ReminderCategory::Work, now)
}

#[test]
fn fresh_store_starts_with_seed_data() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let home = HomeService::new(
        DataStore::new(SqliteSlotRepository::try_new(&conn).unwrap()),
        alerts,
        now,
    );

    assert!(!home.goals().is_empty());
    assert!(!home.reminders().is_empty());
}

#[test]
fn add_goal_persists_and_schedules_deadline_alert() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let added = goal("ship", now + Duration::days(10), now);
    home.add_goal(added.clone());

    assert_eq!(home.goals().len(), 1);

    let reloaded = DataStore::new(SqliteSlotRepository::try_new(&conn).unwrap())
        .load_goals(now)
        .value;
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].id, added.id);

    let pending = alerts.pending_alerts();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].identifier, goal_alert_identifier(added.id));
    assert_eq!(pending[0].trigger_at, added.target_date - Duration::days(1));
}

#[test]
fn completing_goal_via_update_cancels_its_deadline_alert() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let mut tracked = goal("deadline", now + Duration::days(10), now);
    home.add_goal(tracked.clone());
    assert_eq!(alerts.pending_alerts().len(), 1);

    tracked.mark_completed(now);
    home.update_goal(tracked);

    assert!(alerts.pending_alerts().is_empty());
}

#[test]
fn delete_goal_removes_entity_alert_and_durable_record() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let doomed = goal("doomed", now + Duration::days(10), now);
    home.add_goal(doomed.clone());
    home.delete_goal(doomed.id);

    assert!(home.goals().is_empty());
    assert!(alerts.pending_alerts().is_empty());

    let reloaded = DataStore::new(SqliteSlotRepository::try_new(&conn).unwrap())
        .load_goals(now)
        .value;
    assert!(reloaded.iter().all(|g| g.id != doomed.id));
}

#[test]
fn toggle_goal_completion_round_trips() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let mut tracked = goal("toggle", now + Duration::days(10), now);
    tracked.update_progress(0.5, now);
    let id = tracked.id;
    home.add_goal(tracked);

    home.toggle_goal_completion(id, now);
    assert!(home.goals()[0].is_completed);
    assert_eq!(home.goals()[0].progress, 1.0);
    assert!(home.goals()[0].completed_date.is_some());

    home.toggle_goal_completion(id, now);
    assert!(!home.goals()[0].is_completed);
    assert_eq!(home.goals()[0].completed_date, None);
    assert!(home.goals()[0].progress <= 0.99);
}

#[test]
fn progress_update_at_full_auto_completes() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let tracked = goal("auto", now + Duration::days(10), now);
    let id = tracked.id;
    home.add_goal(tracked);

    home.update_goal_progress(id, 2.0, now);

    let stored = &home.goals()[0];
    assert_eq!(stored.progress, 1.0);
    assert!(stored.is_completed);
    assert!(stored.completed_date.is_some());
}

#[test]
fn disabled_reminder_gets_no_alert() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let mut muted = reminder("muted", now + Duration::hours(2), RecurrenceType::None, now);
    muted.is_enabled = false;
    home.add_reminder(muted);

    assert!(alerts.pending_alerts().is_empty());
    assert_eq!(home.reminders()[0].notification_identifier, None);
}

#[test]
fn update_reminder_never_leaves_duplicate_alerts() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let tracked = reminder("edit", now + Duration::hours(2), RecurrenceType::None, now);
    home.add_reminder(tracked.clone());

    let mut edited = home.reminders()[0].clone();
    edited.scheduled_time = now + Duration::hours(5);
    home.update_reminder(edited.clone());

    let pending = alerts.pending_alerts();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].identifier, reminder_alert_identifier(tracked.id));
    assert_eq!(pending[0].trigger_at, edited.scheduled_time);
}

#[test]
fn disabling_via_update_cancels_alert() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    home.add_reminder(reminder(
        "on",
        now + Duration::hours(2),
        RecurrenceType::None,
        now,
    ));
    assert_eq!(alerts.pending_alerts().len(), 1);

    let mut edited = home.reminders()[0].clone();
    edited.is_enabled = false;
    home.update_reminder(edited);

    assert!(alerts.pending_alerts().is_empty());
    assert_eq!(home.reminders()[0].notification_identifier, None);
}

#[test]
fn toggle_reminder_enabled_schedules_and_cancels() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let tracked = reminder("flip", now + Duration::hours(2), RecurrenceType::None, now);
    let id = tracked.id;
    home.add_reminder(tracked);

    home.toggle_reminder_enabled(id);
    assert!(!home.reminders()[0].is_enabled);
    assert!(alerts.pending_alerts().is_empty());

    home.toggle_reminder_enabled(id);
    assert!(home.reminders()[0].is_enabled);
    assert_eq!(alerts.pending_alerts().len(), 1);
    assert_eq!(
        home.reminders()[0].notification_identifier.as_deref(),
        Some(reminder_alert_identifier(id).as_str())
    );
}

#[test]
fn toggling_recurring_reminder_persists_rollover() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let scheduled = now - Duration::hours(1);
    let tracked = reminder("daily", scheduled, RecurrenceType::Daily, now);
    let id = tracked.id;
    home.add_reminder(tracked);

    home.toggle_reminder_completion(id, now);

    let stored = &home.reminders()[0];
    assert!(!stored.is_completed);
    assert_eq!(stored.scheduled_time, scheduled + Duration::days(1));

    let reloaded = DataStore::new(SqliteSlotRepository::try_new(&conn).unwrap())
        .load_reminders(now)
        .value;
    assert_eq!(reloaded[0].scheduled_time, scheduled + Duration::days(1));
}

#[test]
fn delete_reminder_removes_entity_alert_and_durable_record() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let doomed = reminder("doomed", now + Duration::hours(2), RecurrenceType::None, now);
    let id = doomed.id;
    home.add_reminder(doomed);
    home.delete_reminder(id);

    assert!(home.reminders().is_empty());
    assert!(alerts.pending_alerts().is_empty());

    let reloaded = DataStore::new(SqliteSlotRepository::try_new(&conn).unwrap())
        .load_reminders(now)
        .value;
    assert!(reloaded.is_empty());
}

#[test]
fn unknown_ids_are_no_ops() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    home.update_goal(goal("ghost", now + Duration::days(1), now));
    home.toggle_goal_completion(uuid::Uuid::new_v4(), now);
    home.toggle_reminder_completion(uuid::Uuid::new_v4(), now);
    home.toggle_reminder_enabled(uuid::Uuid::new_v4());

    assert!(home.goals().is_empty());
    assert!(home.reminders().is_empty());
}

#[test]
fn overdue_filter_returns_exactly_overdue_goals_sorted() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let older = goal("older overdue", now - Duration::days(5), now);
    let newer = goal("newer overdue", now - Duration::days(1), now);
    let future = goal("future", now + Duration::days(5), now);
    let mut done = goal("done but past", now - Duration::days(3), now);
    done.mark_completed(now);

    home.add_goal(newer.clone());
    home.add_goal(older.clone());
    home.add_goal(future);
    home.add_goal(done);

    let query = ListQuery {
        search: String::new(),
        filter: FilterKind::Overdue,
    };
    let result = home.filtered_goals(&query, now);

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].id, older.id);
    assert_eq!(result[1].id, newer.id);
}

#[test]
fn filtered_goals_sorts_incomplete_before_complete() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let mut done_early = goal("done early", now + Duration::days(1), now);
    done_early.mark_completed(now);
    let open_late = goal("open late", now + Duration::days(9), now);
    let open_early = goal("open early", now + Duration::days(2), now);

    home.add_goal(done_early.clone());
    home.add_goal(open_late.clone());
    home.add_goal(open_early.clone());

    let result = home.filtered_goals(&ListQuery::default(), now);
    let ids: Vec<_> = result.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![open_early.id, open_late.id, done_early.id]);
}

#[test]
fn search_matches_title_and_description_case_insensitively() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let mut by_desc = goal("untitled", now + Duration::days(1), now);
    by_desc.description = "Practice GUITAR daily".to_string();
    let by_title = goal("Guitar shopping", now + Duration::days(2), now);
    let other = goal("unrelated", now + Duration::days(3), now);

    home.add_goal(by_desc.clone());
    home.add_goal(by_title.clone());
    home.add_goal(other);

    let query = ListQuery {
        search: "guitar".to_string(),
        filter: FilterKind::All,
    };
    let result = home.filtered_goals(&query, now);

    assert_eq!(result.len(), 2);
    assert!(result.iter().any(|g| g.id == by_desc.id));
    assert!(result.iter().any(|g| g.id == by_title.id));
}

#[test]
fn active_reminder_filter_requires_enabled() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let active = reminder("active", now + Duration::hours(1), RecurrenceType::None, now);
    let mut disabled = reminder("disabled", now + Duration::hours(2), RecurrenceType::None, now);
    disabled.is_enabled = false;
    let mut completed = reminder("done", now + Duration::hours(3), RecurrenceType::None, now);
    completed.toggle(now);

    home.add_reminder(active.clone());
    home.add_reminder(disabled);
    home.add_reminder(completed);

    let query = ListQuery {
        search: String::new(),
        filter: FilterKind::Active,
    };
    let result = home.filtered_reminders(&query, now);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, active.id);
}

#[test]
fn today_reminders_are_bounded_to_the_calendar_day() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let this_morning = reminder(
        "morning",
        Utc.with_ymd_and_hms(2026, 8, 7, 7, 0, 0).unwrap(),
        RecurrenceType::None,
        now,
    );
    let tonight = reminder(
        "tonight",
        Utc.with_ymd_and_hms(2026, 8, 7, 23, 30, 0).unwrap(),
        RecurrenceType::None,
        now,
    );
    let tomorrow = reminder(
        "tomorrow",
        Utc.with_ymd_and_hms(2026, 8, 8, 0, 0, 0).unwrap(),
        RecurrenceType::None,
        now,
    );
    let mut done_today = reminder(
        "done",
        Utc.with_ymd_and_hms(2026, 8, 7, 9, 0, 0).unwrap(),
        RecurrenceType::None,
        now,
    );
    done_today.toggle(now);

    home.add_reminder(tonight.clone());
    home.add_reminder(this_morning.clone());
    home.add_reminder(tomorrow);
    home.add_reminder(done_today);

    let result = home.today_reminders(now);
    let ids: Vec<_> = result.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![this_morning.id, tonight.id]);
}

#[test]
fn upcoming_goals_window_is_seven_days_and_incomplete_only() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let due_soon = goal("soon", now + Duration::days(3), now);
    let overdue = goal("past", now - Duration::days(1), now);
    let far_out = goal("far", now + Duration::days(10), now);
    let mut done = goal("done", now + Duration::days(2), now);
    done.mark_completed(now);

    home.add_goal(due_soon.clone());
    home.add_goal(overdue.clone());
    home.add_goal(far_out);
    home.add_goal(done);

    let result = home.upcoming_goals(now);
    let ids: Vec<_> = result.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![overdue.id, due_soon.id]);
}

#[test]
fn statistics_scenario_matches_expected_counts() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let mut first = goal("a", now + Duration::days(10), now);
    first.update_progress(0.6, now);
    let mut second = goal("b", now - Duration::days(1), now);
    second.update_progress(0.3, now);
    let mut third = goal("c", now + Duration::days(5), now);
    third.update_progress(1.0, now);

    home.add_goal(first);
    home.add_goal(second);
    home.add_goal(third);

    let stats = home.goal_statistics(now);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.in_progress, 2);
    assert_eq!(stats.overdue, 1);

    let expected = (0.6 + 0.3 + 1.0) / 3.0;
    assert!((home.overall_progress() - expected).abs() < 1e-12);
}

#[test]
fn reminder_statistics_count_pending_and_overdue() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    let mut done = reminder("done", now + Duration::hours(1), RecurrenceType::None, now);
    done.toggle(now);
    let late = reminder("late", now - Duration::hours(1), RecurrenceType::None, now);
    let ahead = reminder("ahead", now + Duration::hours(2), RecurrenceType::None, now);

    home.add_reminder(done);
    home.add_reminder(late);
    home.add_reminder(ahead);

    let stats = home.reminder_statistics(now);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.overdue, 1);
}

#[test]
fn refresh_discards_unpersisted_divergence() {
    let now = fixed_now();
    let conn = open_db_in_memory().unwrap();
    let alerts = Arc::new(LocalAlertCenter::new());
    let mut home = empty_home(&conn, &alerts, now);

    home.add_goal(goal("kept", now + Duration::days(1), now));

    // A second writer replaces the durable collection behind this service.
    let side_store = DataStore::new(SqliteSlotRepository::try_new(&conn).unwrap());
    side_store.save_goals(&[]).unwrap();

    home.refresh(now);
    assert!(home.goals().is_empty());
}
