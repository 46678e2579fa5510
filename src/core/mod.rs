pub mod calculator;
pub mod child_count;
pub mod entry;
pub mod global_event;
pub mod import;
pub mod lock;
pub mod log;
pub mod permissions;
pub mod stats;
pub mod user;
