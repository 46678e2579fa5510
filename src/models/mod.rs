pub mod child_count;
pub mod entry_type;
pub mod global_event;
pub mod monthly_lock;
pub mod role;
pub mod stats;
pub mod time_entry;
pub mod user;
pub mod work_subtype;

/// Normalize a user-supplied code (`Child-Sick`, `child_sick`) to the
/// snake_case form stored in the database.
pub(crate) fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase().replace(['-', ' '], "_")
}
