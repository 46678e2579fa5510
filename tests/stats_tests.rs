use chrono::NaiveDate;
use kitatime::core::entry::EntryLogic;
use kitatime::core::stats::StatsLogic;
use kitatime::errors::AppError;
use kitatime::models::entry_type::EntryType;
use kitatime::models::time_entry::EntryInput;
use kitatime::models::work_subtype::WorkSubtype;

mod common;
use common::{fresh, seed_team};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn monthly_target_for_a_thirty_day_month() {
    let (mut pool, cfg) = fresh("stats_monthly_target");
    let t = seed_team(&mut pool);

    let twc = Some(WorkSubtype::TimeWithChildren);
    let monday = EntryInput::work(d(2024, 6, 10), twc, 8.0);
    let tuesday = EntryInput::work(d(2024, 6, 11), None, 6.0);
    EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &monday).unwrap();
    EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &tuesday).unwrap();
    EntryLogic::create(
        &mut pool,
        &cfg,
        &t.anna,
        t.anna.id,
        &EntryInput::absence(d(2024, 6, 12), EntryType::Sick, 1.0),
    )
    .unwrap();

    let first = StatsLogic::monthly(&mut pool, &t.anna, 2024, 6, t.anna.id).unwrap();
    assert!(close(first.target_hours, 128.571428), "{}", first.target_hours);
    assert!(close(first.worked_hours, 14.0));
    assert!(close(first.overtime, 14.0 - 128.571428));
    assert_eq!(first.sick_days, 1.0);
    assert_eq!(first.vacation_days, 0.0);

    let again = StatsLogic::monthly(&mut pool, &t.anna, 2024, 6, t.anna.id).unwrap();
    assert_eq!(first, again);
}

#[test]
fn weekly_covers_seven_days_from_monday() {
    let (mut pool, cfg) = fresh("stats_weekly");
    let t = seed_team(&mut pool);

    for (day, hours) in [(9, 3.0), (10, 8.0), (16, 7.0), (17, 5.0)] {
        let input = EntryInput::work(d(2024, 6, day), None, hours);
        EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &input).unwrap();
    }

    let week = StatsLogic::weekly(&mut pool, &t.anna, d(2024, 6, 10), t.anna.id).unwrap();
    assert_eq!(week.week_start, d(2024, 6, 10));
    assert!(close(week.worked_hours, 15.0));
    assert!(close(week.target_hours, 30.0));
    assert!(close(week.overtime, -15.0));
}

#[test]
fn annual_over_an_empty_ledger_is_zero() {
    let (mut pool, cfg) = fresh("stats_annual_empty");
    let t = seed_team(&mut pool);

    let a = StatsLogic::annual(&mut pool, &cfg, &t.anna, t.anna.id, 2024).unwrap();
    assert_eq!(a.instruction_hours, 0.0);
    assert_eq!(a.training_days, 0.0);
    assert_eq!(a.education_leave_days, 0.0);
    assert_eq!(a.sick_days, 0.0);
    assert_eq!(a.child_sick_days, 0.0);
    assert_eq!(a.vacation_days, 0.0);
    assert_eq!(a.previous_year_vacation_days, 0.0);
    assert_eq!(a.internship_days, 0.0);
    assert_eq!(a.observation_days, 0.0);
    assert_eq!(a.vacation_remaining, a.vacation_entitlement);
}

#[test]
fn annual_counts_carry_over_vacation() {
    let (mut pool, cfg) = fresh("stats_annual_carryover");
    let t = seed_team(&mut pool);

    let carry = EntryInput::absence(d(2024, 2, 5), EntryType::Vacation, 2.0)
        .with_description("Urlaub Vorjahr");
    let summer = EntryInput::absence(d(2024, 7, 15), EntryType::Vacation, 3.0);
    let instruction = EntryInput::work(d(2024, 3, 4), Some(WorkSubtype::Instruction), 2.5);
    for input in [carry, summer, instruction] {
        EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &input).unwrap();
    }

    let a = StatsLogic::annual(&mut pool, &cfg, &t.anna, t.anna.id, 2024).unwrap();
    assert_eq!(a.vacation_days, 5.0);
    assert_eq!(a.previous_year_vacation_days, 2.0);
    assert_eq!(a.vacation_entitlement, 32.0);
    assert_eq!(a.vacation_remaining, 29.0);
    assert_eq!(a.instruction_hours, 2.5);
}

#[test]
fn carry_over_marker_ignores_case() {
    let (mut pool, cfg) = fresh("stats_annual_marker_case");
    let t = seed_team(&mut pool);

    let carry = EntryInput::absence(d(2024, 2, 5), EntryType::Vacation, 2.0)
        .with_description("Resturlaub vorjahr");
    EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &carry).unwrap();

    let a = StatsLogic::annual(&mut pool, &cfg, &t.anna, t.anna.id, 2024).unwrap();
    assert_eq!(a.previous_year_vacation_days, 2.0);
    assert_eq!(a.vacation_remaining, 32.0);
}

#[test]
fn annual_sums_every_category() {
    let (mut pool, cfg) = fresh("stats_annual_categories");
    let t = seed_team(&mut pool);

    let training = EntryInput {
        days: 2.0,
        ..EntryInput::work(d(2024, 5, 6), Some(WorkSubtype::Training), 0.0)
    };
    // days on another work subtype are not training
    let conference = EntryInput {
        days: 1.0,
        ..EntryInput::work(d(2024, 5, 7), Some(WorkSubtype::Conference), 0.0)
    };
    let ledger = [
        training,
        conference,
        EntryInput::work(d(2024, 5, 8), Some(WorkSubtype::Instruction), 1.5),
        EntryInput::absence(d(2024, 4, 8), EntryType::EducationLeave, 3.0),
        EntryInput::absence(d(2024, 4, 15), EntryType::Sick, 2.0),
        EntryInput::absence(d(2024, 9, 2), EntryType::ChildSick, 1.5),
        EntryInput::absence(d(2024, 10, 7), EntryType::Internship, 4.0),
        EntryInput::absence(d(2024, 11, 4), EntryType::Observation, 0.5),
        // last day of the carry-over window counts, the day after does not
        EntryInput::absence(d(2024, 3, 31), EntryType::Vacation, 1.0)
            .with_description("Vorjahr"),
        EntryInput::absence(d(2024, 4, 1), EntryType::Vacation, 1.0)
            .with_description("Vorjahr"),
        // other years stay out
        EntryInput::absence(d(2023, 12, 28), EntryType::Sick, 1.0),
    ];
    for input in &ledger {
        EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, input).unwrap();
    }

    let a = StatsLogic::annual(&mut pool, &cfg, &t.anna, t.anna.id, 2024).unwrap();
    assert_eq!(a.training_days, 2.0);
    assert_eq!(a.instruction_hours, 1.5);
    assert_eq!(a.education_leave_days, 3.0);
    assert_eq!(a.sick_days, 2.0);
    assert_eq!(a.child_sick_days, 1.5);
    assert_eq!(a.internship_days, 4.0);
    assert_eq!(a.observation_days, 0.5);
    assert_eq!(a.vacation_days, 2.0);
    assert_eq!(a.previous_year_vacation_days, 1.0);
    assert_eq!(a.vacation_remaining, 31.0);
}

#[test]
fn week_at_the_end_of_the_calendar_is_an_invalid_period() {
    let (mut pool, _cfg) = fresh("stats_weekly_max_date");
    let t = seed_team(&mut pool);

    let err = StatsLogic::weekly(&mut pool, &t.anna, NaiveDate::MAX, t.anna.id).unwrap_err();
    assert!(matches!(err, AppError::InvalidPeriod(_)));
}

#[test]
fn staff_cannot_read_colleagues() {
    let (mut pool, cfg) = fresh("stats_staff_denied");
    let t = seed_team(&mut pool);

    let err = StatsLogic::annual(&mut pool, &cfg, &t.anna, t.ben.id, 2024).unwrap_err();
    assert!(matches!(err, AppError::Permission(_)));

    let team = StatsLogic::monthly_team(&mut pool, &t.anna, 2024, 6).unwrap();
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].user_id, t.anna.id);

    let team = StatsLogic::weekly_team(&mut pool, &t.lead, d(2024, 6, 10)).unwrap();
    assert_eq!(team.len(), 4);

    // leadership may read anybody
    assert!(StatsLogic::annual(&mut pool, &cfg, &t.lead, t.ben.id, 2024).is_ok());
}
