pub mod dashboard;
pub mod watch;
