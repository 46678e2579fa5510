use chrono::NaiveDate;
use kitatime::core::child_count::ChildCountLogic;
use kitatime::core::entry::EntryLogic;
use kitatime::core::import::ImportLogic;
use kitatime::errors::AppError;
use kitatime::export::{ExportFormat, ExportKind, ExportLogic};
use kitatime::models::child_count::ChildCountInput;
use kitatime::models::time_entry::EntryInput;
use kitatime::models::work_subtype::WorkSubtype;
use std::fs;

mod common;
use common::{fresh, seed_team, temp_out};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn export_entries_csv_with_range() {
    let (mut pool, cfg) = fresh("export_entries_csv");
    let t = seed_team(&mut pool);

    let twc = Some(WorkSubtype::TimeWithChildren);
    for input in [
        EntryInput::work(d(2024, 6, 10), twc, 8.0),
        EntryInput::work(d(2024, 7, 1), None, 5.0),
    ] {
        EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &input).unwrap();
    }

    let out = temp_out("export_entries_csv", "csv");
    let n = ExportLogic::export(
        &mut pool,
        &t.lead,
        ExportKind::Entries,
        ExportFormat::Csv,
        &out,
        Some("2024-06"),
        false,
    )
    .unwrap();
    assert_eq!(n, 1);

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert!(lines.next().unwrap().contains("prep_hours"));
    let row = lines.next().unwrap();
    assert!(row.contains("2024-06-10"));
    assert!(row.contains("anna"));
    assert!(row.contains("time_with_children"));
    assert!(lines.next().is_none());
}

#[test]
fn export_refuses_existing_files_without_force() {
    let (mut pool, cfg) = fresh("export_force");
    let t = seed_team(&mut pool);
    let input = EntryInput::work(d(2024, 6, 10), None, 1.0);
    EntryLogic::create(&mut pool, &cfg, &t.anna, t.anna.id, &input).unwrap();

    let out = temp_out("export_force", "json");
    fs::write(&out, "old").unwrap();

    let err = ExportLogic::export(
        &mut pool,
        &t.lead,
        ExportKind::Entries,
        ExportFormat::Json,
        &out,
        None,
        false,
    ).unwrap_err();
    assert!(matches!(err, AppError::Export(_)));
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    ExportLogic::export(
        &mut pool,
        &t.lead,
        ExportKind::Entries,
        ExportFormat::Json,
        &out,
        None,
        true,
    ).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(1));

    let err = ExportLogic::export(
        &mut pool,
        &t.lead,
        ExportKind::Entries,
        ExportFormat::Json,
        "relative.json",
        None,
        true,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Export(_)));
}

#[test]
fn export_child_counts_xlsx_and_permissions() {
    let (mut pool, _cfg) = fresh("export_child_xlsx");
    let t = seed_team(&mut pool);
    let input = ChildCountInput {
        date: d(2024, 6, 10),
        time_slot: "08:00".into(),
        under_3_count: 9,
        over_3_count: 25,
    };
    ChildCountLogic::create(&mut pool, &t.anna, &input).unwrap();

    let out = temp_out("export_child_xlsx", "xlsx");
    let err = ExportLogic::export(
        &mut pool,
        &t.anna,
        ExportKind::ChildCounts,
        ExportFormat::Xlsx,
        &out,
        None,
        false,
    ).unwrap_err();
    assert!(matches!(err, AppError::Permission(_)));

    let n = ExportLogic::export(
        &mut pool,
        &t.admin,
        ExportKind::ChildCounts,
        ExportFormat::Xlsx,
        &out,
        None,
        false,
    ).unwrap();
    assert_eq!(n, 1);
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn empty_export_writes_nothing() {
    let (mut pool, _cfg) = fresh("export_empty");
    let t = seed_team(&mut pool);

    let out = temp_out("export_empty", "csv");
    let n = ExportLogic::export(
        &mut pool,
        &t.lead,
        ExportKind::Events,
        ExportFormat::Csv,
        &out,
        Some("2024"),
        false,
    ).unwrap();
    assert_eq!(n, 0);
    assert!(fs::metadata(&out).is_err());
}

#[test]
fn import_reports_errors_and_warnings() {
    let (mut pool, cfg) = fresh("import_mixed");
    let t = seed_team(&mut pool);

    let file = temp_out("import_mixed", "csv");
    fs::write(
        &file,
        "date,user,type,hours,subtype,days,description\n\
         2024-06-10,anna,work,8,time_with_children,,\n\
         2024-06-12,nobody,work,4,,,\n\
         2024-06-13,anna,vacation,,,1,summer\n\
         2024-06-10,anna,work,8,time_with_children,,\n\
         2024-06-14,Ben Berger,work,3,bogus,,\n\
         2024-06-31,anna,work,3,,,\n",
    )
    .unwrap();

    let report = ImportLogic::import_entries(&mut pool, &cfg, &t.lead, &file).unwrap();
    assert_eq!(report.imported, 3);
    assert_eq!(report.errors.len(), 2, "{:?}", report.errors);
    assert!(report.errors[0].starts_with("line 3:"));
    assert_eq!(report.warnings.len(), 2, "{:?}", report.warnings);
    assert!(!report.is_success());

    let annas = EntryLogic::list(&mut pool, &t.lead, Some(t.anna.id), None).unwrap();
    assert_eq!(annas.len(), 2);
    assert_eq!(annas[0].prep_hours, 4.0);
    let bens = EntryLogic::list(&mut pool, &t.lead, Some(t.ben.id), None).unwrap();
    assert_eq!(bens[0].subtype, None);
}

#[test]
fn import_semicolon_file_with_decimal_comma() {
    let (mut pool, cfg) = fresh("import_semicolon");
    let t = seed_team(&mut pool);

    let file = temp_out("import_semicolon", "csv");
    fs::write(&file, "date;user;type;hours\n2024-06-11;ben;work;7,5\n").unwrap();

    let report = ImportLogic::import_entries(&mut pool, &cfg, &t.admin, &file).unwrap();
    assert!(report.is_success());
    assert_eq!(report.imported, 1);

    let bens = EntryLogic::list(&mut pool, &t.admin, Some(t.ben.id), None).unwrap();
    assert_eq!(bens[0].hours, 7.5);
}

#[test]
fn import_needs_the_required_columns() {
    let (mut pool, cfg) = fresh("import_columns");
    let t = seed_team(&mut pool);

    let file = temp_out("import_columns", "csv");
    fs::write(&file, "date,user,hours\n2024-06-11,ben,3\n").unwrap();
    assert!(matches!(
        ImportLogic::import_entries(&mut pool, &cfg, &t.admin, &file),
        Err(AppError::Validation(_))
    ));

    assert!(matches!(
        ImportLogic::import_entries(&mut pool, &cfg, &t.anna, &file),
        Err(AppError::Permission(_))
    ));
}

#[test]
fn template_can_be_read_back() {
    let (mut pool, cfg) = fresh("import_template");
    let t = seed_team(&mut pool);

    let file = temp_out("import_template", "csv");
    ImportLogic::write_template(&file).unwrap();

    let report = ImportLogic::import_entries(&mut pool, &cfg, &t.admin, &file).unwrap();
    assert!(report.is_success(), "{:?}", report.errors);
    assert_eq!(report.imported, 1);
}
