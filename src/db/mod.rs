pub mod child_counts;
pub mod db_utils;
pub mod entries;
pub mod global_events;
pub mod initialize;
pub mod locks;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod push;
pub mod users;
