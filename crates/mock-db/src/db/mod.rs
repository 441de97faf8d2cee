//! Database integration for seeding test data.
//!
//! The [`Seeder`] resets the target table and inserts generated users one
//! statement at a time over a single pooled connection.

pub mod schema;
mod seeder;

pub use seeder::{SeedError, SeedSummary, Seeder, seed};
