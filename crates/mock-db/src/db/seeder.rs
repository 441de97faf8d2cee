//! Database seeding utilities.

use std::time::Duration;

use rand::Rng;
use sqlx::{PgConnection, PgPool, postgres::PgPoolOptions};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::schema;
use crate::config::SeedConfig;
use crate::generators::UserGenerator;
use crate::models::UserRecord;

/// How long to wait for the single pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Rows between progress log lines.
const PROGRESS_INTERVAL: usize = 100;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Connection error")]
    Connect(#[source] sqlx::Error),
    #[error("Schema error")]
    Schema(#[source] sqlx::Error),
    #[error("Insert of record {index} failed")]
    Insert {
        index: usize,
        #[source]
        source: sqlx::Error,
    },
    #[error("Invalid table name: {0:?}")]
    InvalidTable(String),
}

fn check_table_name(table: &str) -> Result<(), SeedError> {
    if schema::is_valid_table_name(table) {
        Ok(())
    } else {
        Err(SeedError::InvalidTable(table.to_string()))
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub table: String,
    pub inserted: usize,
}

/// Database seeder that resets the users table and fills it one row at a time.
pub struct Seeder {
    pool: PgPool,
    table: String,
    record_count: usize,
}

impl Seeder {
    /// Creates a seeder over an existing pool.
    pub fn new(pool: PgPool, config: &SeedConfig) -> Result<Self, SeedError> {
        check_table_name(&config.table)?;
        Ok(Self::from_parts(pool, config))
    }

    /// Opens a single-connection pool against `config.database_url`.
    pub async fn connect(config: &SeedConfig) -> Result<Self, SeedError> {
        check_table_name(&config.table)?;

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(&config.database_url)
            .await
            .map_err(SeedError::Connect)?;

        info!("Connected to database");

        Ok(Self::from_parts(pool, config))
    }

    fn from_parts(pool: PgPool, config: &SeedConfig) -> Self {
        Self {
            pool,
            table: config.table.clone(),
            record_count: config.record_count,
        }
    }

    /// Drops and recreates the table, then inserts `record_count` users.
    ///
    /// Inserts are awaited one by one outside any transaction, so a failure
    /// leaves the rows inserted before it in place.
    pub async fn run(&self, rng: &mut impl Rng) -> Result<SeedSummary, SeedError> {
        // Released back to the pool when it goes out of scope, on every path.
        let mut conn = self.pool.acquire().await.map_err(SeedError::Connect)?;

        self.reset_schema(&mut conn).await?;

        info!("Seeding {} users into {}...", self.record_count, self.table);

        let mut generator = UserGenerator::new();
        let now = OffsetDateTime::now_utc();
        let users = (0..self.record_count).map(|_| generator.generate(rng, now));
        let inserted = self.insert_all(&mut conn, users).await?;

        info!("Seeded {} users", inserted);

        Ok(SeedSummary {
            table: self.table.clone(),
            inserted,
        })
    }

    /// Drops and recreates the table on a freshly acquired connection.
    pub async fn reset(&self) -> Result<(), SeedError> {
        let mut conn = self.pool.acquire().await.map_err(SeedError::Connect)?;
        self.reset_schema(&mut conn).await
    }

    /// Inserts `users` in order, stopping at the first failure.
    pub async fn insert_users<I>(&self, users: I) -> Result<usize, SeedError>
    where
        I: IntoIterator<Item = UserRecord>,
    {
        let mut conn = self.pool.acquire().await.map_err(SeedError::Connect)?;
        self.insert_all(&mut conn, users).await
    }

    /// Shuts down the pool, waiting for the connection to be returned.
    pub async fn close(self) {
        self.pool.close().await;
        info!("Database pool closed");
    }

    async fn reset_schema(&self, conn: &mut PgConnection) -> Result<(), SeedError> {
        info!("Recreating table {}", self.table);

        sqlx::query(&schema::drop_table_sql(&self.table))
            .execute(&mut *conn)
            .await
            .map_err(SeedError::Schema)?;

        sqlx::query(&schema::create_table_sql(&self.table))
            .execute(&mut *conn)
            .await
            .map_err(SeedError::Schema)?;

        Ok(())
    }

    /// Each record is pulled from `users` only after the previous insert
    /// has completed.
    async fn insert_all<I>(&self, conn: &mut PgConnection, users: I) -> Result<usize, SeedError>
    where
        I: IntoIterator<Item = UserRecord>,
    {
        let insert = schema::insert_sql(&self.table);
        let mut inserted = 0;

        for (index, user) in users.into_iter().enumerate() {
            insert_user(&mut *conn, &insert, &user)
                .await
                .map_err(|source| SeedError::Insert { index, source })?;

            inserted += 1;
            debug!(index, email = %user.email, "Inserted user");
            if inserted % PROGRESS_INTERVAL == 0 {
                info!("  Seeded {}/{} users", inserted, self.record_count);
            }
        }

        Ok(inserted)
    }
}

async fn insert_user(
    conn: &mut PgConnection,
    sql: &str,
    user: &UserRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(sql)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.date_of_birth)
        .bind(user.status.as_str())
        .bind(user.last_login)
        .execute(conn)
        .await?;

    Ok(())
}

/// Connects, runs the seeder and closes the pool whether or not the run
/// succeeded. Errors are returned to the caller for reporting.
pub async fn seed(config: &SeedConfig, rng: &mut impl Rng) -> Result<SeedSummary, SeedError> {
    let seeder = Seeder::connect(config).await?;
    let result = seeder.run(rng).await;
    seeder.close().await;
    result
}
