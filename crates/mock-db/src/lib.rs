//! Synthetic data seeding for a PostgreSQL `users` table.
//!
//! The crate drops and recreates the table, then fills it with fake users
//! generated by [`generators::UserGenerator`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use mock_db::prelude::*;
//!
//! let config = SeedConfig::from_env();
//! let summary = seed(&config, &mut rand::thread_rng()).await?;
//! assert_eq!(summary.inserted, 1000);
//! ```

pub mod config;
pub mod db;
pub mod generators;
pub mod models;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, SeedSummary, Seeder, seed};
    pub use crate::generators::UserGenerator;
    pub use crate::models::{UserRecord, UserStatus};
}
