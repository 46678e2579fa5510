pub mod prep;
pub mod staffing;
pub mod target;
