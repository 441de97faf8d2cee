//! Entity generators for test data.
//!
//! - [`UserGenerator`]: Generate users with names, emails, birth dates and statuses

pub mod user;

pub use user::{UserGenConfig, UserGenerator};
