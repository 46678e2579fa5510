use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It doubles as the migration ledger.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

/// Schema history, oldest first. A version is applied at most once.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20240801_0001_create_users",
        "Created users table",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id                     INTEGER PRIMARY KEY AUTOINCREMENT,
            username               TEXT NOT NULL UNIQUE,
            email                  TEXT,
            full_name              TEXT NOT NULL,
            role                   TEXT NOT NULL CHECK(role IN ('staff','leadership','admin')),
            is_active              INTEGER NOT NULL DEFAULT 1,
            weekly_hours           REAL NOT NULL DEFAULT 0,
            additional_hours       REAL NOT NULL DEFAULT 0,
            work_days_per_week     INTEGER NOT NULL DEFAULT 5,
            vacation_days_per_year INTEGER NOT NULL DEFAULT 32,
            created_at             TEXT NOT NULL
        );
        "#,
    ),
    (
        "20240801_0002_create_time_entries",
        "Created time_entries table",
        r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES users(id),
            date        TEXT NOT NULL,
            entry_type  TEXT NOT NULL CHECK(entry_type IN
                ('work','sick','child_sick','vacation',
                 'education_leave','observation','internship')),
            subtype     TEXT,
            hours       REAL NOT NULL DEFAULT 0,
            days        REAL NOT NULL DEFAULT 0,
            prep_hours  REAL NOT NULL DEFAULT 0,
            description TEXT,
            is_locked   INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_user_date ON time_entries(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_entries_user_type ON time_entries(user_id, entry_type);
        "#,
    ),
    (
        "20240801_0003_create_monthly_locks",
        "Created monthly_locks table",
        r#"
        CREATE TABLE IF NOT EXISTS monthly_locks (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id   INTEGER NOT NULL REFERENCES users(id),
            year      INTEGER NOT NULL,
            month     INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
            locked_at TEXT NOT NULL,
            locked_by INTEGER NOT NULL REFERENCES users(id)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_locks_user_period
            ON monthly_locks(user_id, year, month);
        "#,
    ),
    (
        "20240801_0004_create_child_counts",
        "Created child_counts table",
        r#"
        CREATE TABLE IF NOT EXISTS child_counts (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            date          TEXT NOT NULL,
            time_slot     TEXT NOT NULL,
            under_3_count INTEGER NOT NULL DEFAULT 0,
            over_3_count  INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_child_counts_slot
            ON child_counts(date, time_slot);
        "#,
    ),
    (
        "20240801_0005_create_global_events",
        "Created global_events table",
        r#"
        CREATE TABLE IF NOT EXISTS global_events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,
            event_type  TEXT NOT NULL,
            description TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_global_events_day_type
            ON global_events(date, event_type);
        "#,
    ),
    (
        "20240901_0006_create_push_notifications",
        "Created push_notifications outbox",
        r#"
        CREATE TABLE IF NOT EXISTS push_notifications (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL REFERENCES users(id),
            title      TEXT NOT NULL,
            body       TEXT NOT NULL,
            payload    TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_push_user ON push_notifications(user_id);
        "#,
    ),
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply_migration(conn: &Connection, version: &str, message: &str, sql: &str) -> Result<()> {
    // 1) Skip when already applied
    if is_applied(conn, version)? {
        return Ok(());
    }

    // 2) Schema change and ledger row commit together
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", version, message));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, sql) in MIGRATIONS {
        apply_migration(conn, version, message, sql)?;
    }

    Ok(())
}

/// Versions recorded in the ledger, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    crate::db::db_utils::collect_rows(rows)
}
