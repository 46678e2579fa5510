use chrono::NaiveDate;
use kitatime::config::LockPolicy;
use kitatime::core::entry::EntryLogic;
use kitatime::core::lock::LockLogic;
use kitatime::db::{entries, locks};
use kitatime::errors::AppError;
use kitatime::models::monthly_lock::LockFilter;
use kitatime::models::time_entry::EntryInput;
use kitatime::models::work_subtype::WorkSubtype;

mod common;
use common::{FailingNotifier, RecordingNotifier, fresh, seed_team};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn june_work(day: u32, hours: f64) -> EntryInput {
    EntryInput::work(d(2024, 6, day), Some(WorkSubtype::TimeWithChildren), hours)
}

#[test]
fn lock_flags_entries_and_blocks_staff() {
    let (mut pool, cfg) = fresh("lock_flags_entries");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    let entry =
        EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &june_work(10, 8.0)).unwrap();
    assert_eq!(entry.prep_hours, 4.0);
    assert_eq!(entry.total_hours(), 12.0);
    assert!(!entry.is_locked);

    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap();

    let stored = entries::find_entry(&pool.conn, entry.id).unwrap().unwrap();
    assert!(stored.is_locked);

    let err =
        EntryLogic::update(&mut pool, &cfg, &t.anna, entry.id, &june_work(10, 7.0)).unwrap_err();
    assert!(matches!(err, AppError::MonthLocked { year: 2024, month: 6, .. }));

    let err =
        EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &june_work(11, 5.0)).unwrap_err();
    assert!(matches!(err, AppError::MonthLocked { .. }));

    let err = EntryLogic::delete(&mut pool, &cfg, &t.anna, entry.id).unwrap_err();
    assert!(matches!(err, AppError::MonthLocked { .. }));

    // July stays open, and so does Ben's June
    let july = EntryInput::work(d(2024, 7, 1), None, 6.0);
    EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &july).unwrap();
    EntryLogic::create(&mut pool, &cfg, &t.ben, t.ben.id, &june_work(12, 6.0)).unwrap();
}

#[test]
fn moving_an_entry_into_a_locked_month_is_rejected() {
    let (mut pool, cfg) = fresh("lock_move_into");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    let july = EntryInput::work(d(2024, 7, 2), None, 6.0);
    let entry = EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &july).unwrap();
    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap();

    let err =
        EntryLogic::update(&mut pool, &cfg, &t.anna, entry.id, &june_work(28, 6.0)).unwrap_err();
    assert!(matches!(err, AppError::MonthLocked { month: 6, .. }));
}

#[test]
fn double_lock_is_a_conflict() {
    let (mut pool, cfg) = fresh("lock_double");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap();
    let err = LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.lead).unwrap_err();

    assert!(matches!(err, AppError::AlreadyLocked { .. }));
    assert!(err.is_conflict());

    let filter = LockFilter {
        year: Some(2024),
        month: Some(6),
        user_id: Some(t.anna.id),
    };
    assert_eq!(locks::list_locks(&pool.conn, &filter).unwrap().len(), 1);
}

#[test]
fn unlock_clears_flags_and_allows_changes() {
    let (mut pool, cfg) = fresh("lock_unlock");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    let a = EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &june_work(3, 8.0)).unwrap();
    let b = EntryLogic::create(&mut pool, &cfg, &t.ben, t.ben.id, &june_work(3, 8.0)).unwrap();
    let lock = LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.lead).unwrap();

    LockLogic::unlock(&mut pool, lock.id, &t.lead).unwrap();

    assert!(!entries::find_entry(&pool.conn, a.id).unwrap().unwrap().is_locked);
    assert!(!entries::find_entry(&pool.conn, b.id).unwrap().unwrap().is_locked);
    assert!(!locks::is_locked(&pool.conn, t.anna.id, 2024, 6).unwrap());

    let updated = EntryLogic::update(&mut pool, &cfg, &t.anna, a.id, &june_work(3, 5.0)).unwrap();
    assert_eq!(updated.prep_hours, 2.5);

    let err = LockLogic::unlock(&mut pool, lock.id, &t.lead).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn failing_notifications_do_not_undo_the_lock() {
    let (mut pool, cfg) = fresh("lock_notify_failure");
    let t = seed_team(&mut pool);

    let lock = LockLogic::lock(&mut pool, &cfg, &FailingNotifier, t.anna.id, 2024, 6, &t.admin);
    assert!(lock.is_ok());
    assert!(locks::is_locked(&pool.conn, t.anna.id, 2024, 6).unwrap());
}

#[test]
fn lock_notifies_the_owner() {
    let (mut pool, cfg) = fresh("lock_notify");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap();
    LockLogic::lock(&mut pool, &cfg, &n, t.ben.id, 2024, 6, &t.admin).unwrap();

    let emails = n.emails.borrow();
    assert_eq!(emails.len(), 1, "ben has no email address");
    assert_eq!(emails[0].0, "anna@kita.example");
    assert!(emails[0].1.subject.contains("June 2024"));

    let pushes = n.pushes.borrow();
    assert_eq!(pushes.len(), 2);
    assert_eq!(pushes[0].0, t.anna.id);
    assert_eq!(pushes[1].1.kind, "lock_notification");
}

#[test]
fn failed_ledger_update_rolls_the_lock_back() {
    let (mut pool, cfg) = fresh("lock_rollback");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    let entry =
        EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &june_work(10, 8.0)).unwrap();
    pool.conn
        .execute_batch(
            "CREATE TRIGGER refuse_lock_flag BEFORE UPDATE OF is_locked ON time_entries
             BEGIN SELECT RAISE(ABORT, 'ledger is read-only'); END;",
        )
        .unwrap();

    let err = LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));

    assert!(!locks::is_locked(&pool.conn, t.anna.id, 2024, 6).unwrap());
    assert!(!entries::find_entry(&pool.conn, entry.id).unwrap().unwrap().is_locked);
    assert!(n.emails.borrow().is_empty());
    assert!(n.pushes.borrow().is_empty());

    // the month stays writable for its owner
    EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &june_work(11, 5.0)).unwrap();
}

#[test]
fn leadership_override_writes_locked_rows() {
    let (mut pool, cfg) = fresh("lock_override");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap();
    let entry =
        EntryLogic::create(&mut pool, &cfg, &t.lead, t.anna.id, &june_work(14, 4.0)).unwrap();

    assert!(entry.is_locked);
    assert!(entries::find_entry(&pool.conn, entry.id).unwrap().unwrap().is_locked);
}

#[test]
fn strict_policy_blocks_leadership_too() {
    let (mut pool, mut cfg) = fresh("lock_strict");
    cfg.lock_policy = LockPolicy::Strict;
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap();
    let err =
        EntryLogic::create(&mut pool, &cfg, &t.admin, t.anna.id, &june_work(14, 4.0)).unwrap_err();
    assert!(matches!(err, AppError::MonthLocked { .. }));
}

#[test]
fn invalid_periods_are_rejected() {
    let (mut pool, cfg) = fresh("lock_invalid_period");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    for (year, month) in [(2024, 13), (2024, 0), (2019, 6), (2031, 1)] {
        let err =
            LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, year, month, &t.admin).unwrap_err();
        assert!(matches!(err, AppError::InvalidPeriod(_)), "{year}-{month}");
    }
}

#[test]
fn staff_cannot_lock() {
    let (mut pool, cfg) = fresh("lock_staff_denied");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    let err = LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.anna).unwrap_err();
    assert!(matches!(err, AppError::Permission(_)));
}

#[test]
fn bulk_lock_reports_per_user_errors() {
    let (mut pool, cfg) = fresh("lock_bulk");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap();

    let err = LockLogic::bulk_lock(&mut pool, &cfg, &n, 2024, 6, &[], &t.lead).unwrap_err();
    assert!(matches!(err, AppError::Permission(_)));

    let report = LockLogic::bulk_lock(&mut pool, &cfg, &n, 2024, 6, &[], &t.admin).unwrap();
    assert_eq!(report.locked.len(), 3);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].user_id, t.anna.id);

    let removed = LockLogic::bulk_unlock(&mut pool, &cfg, 2024, 6, &[t.ben.id], &t.admin).unwrap();
    assert_eq!(removed, 1);
    assert!(!locks::is_locked(&pool.conn, t.ben.id, 2024, 6).unwrap());
    assert!(locks::is_locked(&pool.conn, t.anna.id, 2024, 6).unwrap());

    let removed = LockLogic::bulk_unlock(&mut pool, &cfg, 2024, 6, &[], &t.admin).unwrap();
    assert_eq!(removed, 3);
}

#[test]
fn status_lists_every_active_user() {
    let (mut pool, cfg) = fresh("lock_status");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &june_work(3, 8.0)).unwrap();
    EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &june_work(4, 8.0)).unwrap();
    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.lead).unwrap();

    let rows = LockLogic::status(&mut pool, &cfg, 2024, 6, &t.lead).unwrap();
    assert_eq!(rows.len(), 4);

    let anna = rows.iter().find(|r| r.user_id == t.anna.id).unwrap();
    assert!(anna.is_locked);
    assert_eq!(anna.entry_count, 2);
    assert_eq!(anna.locked_by, Some(t.lead.id));
    assert_eq!(anna.locked_by_name.as_deref(), Some("Lena Leitung"));

    let ben = rows.iter().find(|r| r.user_id == t.ben.id).unwrap();
    assert!(!ben.is_locked);
    assert!(ben.lock_id.is_none());

    assert!(matches!(
        LockLogic::status(&mut pool, &cfg, 2024, 6, &t.ben),
        Err(AppError::Permission(_))
    ));
}

#[test]
fn staff_only_list_their_own_locks() {
    let (mut pool, cfg) = fresh("lock_list_staff");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap();
    LockLogic::lock(&mut pool, &cfg, &n, t.ben.id, 2024, 6, &t.admin).unwrap();

    let mine = LockLogic::list(&mut pool, &t.ben, LockFilter::default()).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_id, t.ben.id);

    let all = LockLogic::list(&mut pool, &t.lead, LockFilter::default()).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn reminders_skip_locked_users() {
    let (mut pool, cfg) = fresh("lock_reminders");
    let t = seed_team(&mut pool);
    let n = RecordingNotifier::default();

    LockLogic::lock(&mut pool, &cfg, &n, t.anna.id, 2024, 6, &t.admin).unwrap();
    n.emails.borrow_mut().clear();
    n.pushes.borrow_mut().clear();

    let report =
        LockLogic::send_reminders(&mut pool, &cfg, &n, 2024, 6, Some(5), &[], &t.lead).unwrap();

    // lena gets mail; admin and ben have no address
    assert_eq!(report.sent_count, 1);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(n.emails.borrow()[0].0, "lena@kita.example");
    assert!(n.emails.borrow()[0].1.body.contains("in 5 day(s)"));
    assert_eq!(n.pushes.borrow().len(), 1);
    assert_eq!(n.pushes.borrow()[0].1.kind, "lock_reminder");
}

#[test]
fn failed_reminder_sends_no_push() {
    let (mut pool, cfg) = fresh("lock_reminders_failing");
    let t = seed_team(&mut pool);

    let report = LockLogic::send_reminders(
        &mut pool,
        &cfg,
        &FailingNotifier,
        2024,
        6,
        None,
        &[t.anna.id],
        &t.admin,
    )
    .unwrap();
    assert_eq!(report.sent_count, 0);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Anna Albrecht"));
}
