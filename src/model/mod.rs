pub mod attendance;
pub mod employee;
pub mod location;
pub mod schedule;
pub mod session;
pub mod summary;
