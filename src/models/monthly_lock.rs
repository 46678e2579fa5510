use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyLock {
    pub id: i64,
    pub user_id: i64,
    pub year: i32,
    pub month: u32,
    pub locked_at: String,
    pub locked_by: i64,
}

/// Lock state of one user for one month, as shown to leadership.
#[derive(Debug, Clone, Serialize)]
pub struct LockStatus {
    pub user_id: i64,
    pub user_name: String,
    pub year: i32,
    pub month: u32,
    pub is_locked: bool,
    pub lock_id: Option<i64>,
    pub locked_at: Option<String>,
    pub locked_by: Option<i64>,
    pub locked_by_name: Option<String>,
    pub entry_count: i64,
}

/// One user that a bulk lock skipped, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct BulkLockError {
    pub user_id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkLockReport {
    pub locked: Vec<MonthlyLock>,
    pub errors: Vec<BulkLockError>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReminderReport {
    pub sent_count: usize,
    pub errors: Vec<String>,
}

/// Filter for listing locks; `None` matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub user_id: Option<i64>,
}
