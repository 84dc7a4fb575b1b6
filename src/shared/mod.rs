//! Parsers for the date-time and size arguments
//!
//! Both run once at startup; failures are `ConfigError`s and abort the
//! search before any directory is walked.

pub mod datetime;
pub mod size;

pub use datetime::parse_datetime;
pub use size::parse_size;
