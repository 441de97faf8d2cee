//! User generation.

use std::collections::HashSet;

use fake::{
    Fake,
    faker::{
        internet::en::{FreeEmail, Password},
        name::en::{FirstName, LastName},
    },
};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

use crate::models::{EMAIL_MAX_LEN, NAME_MAX_LEN, PASSWORD_MAX_LEN, UserRecord, UserStatus};

/// Attempts at drawing a fresh email before falling back to a numbered one.
const EMAIL_ATTEMPTS: usize = 16;

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Youngest age in years.
    pub min_age: i64,
    /// Oldest age in years.
    pub max_age: i64,
    /// Mean age in years.
    pub age_mean: f64,
    /// Standard deviation of age in years.
    pub age_std: f64,
    /// How far back the last login may lie.
    pub last_login_window: Duration,
    /// Placeholder password length range.
    pub password_len: std::ops::Range<usize>,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 80,
            age_mean: 38.0,
            age_std: 14.0,
            last_login_window: Duration::days(365),
            password_len: 8..21,
        }
    }
}

/// Generates synthetic users.
///
/// Emails are unique across everything a single generator has produced, so a
/// run never trips the `email` uniqueness constraint on its own output.
pub struct UserGenerator {
    config: UserGenConfig,
    seen_emails: HashSet<String>,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Self {
        Self::with_config(UserGenConfig::default())
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig) -> Self {
        Self {
            config,
            seen_emails: HashSet::new(),
        }
    }

    /// Generates a single user relative to `now`.
    pub fn generate(&mut self, rng: &mut impl Rng, now: OffsetDateTime) -> UserRecord {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let email = self.generate_email(rng);
        let password_hash: String = Password(self.config.password_len.clone()).fake_with_rng(rng);
        let status = UserStatus::ALL[rng.gen_range(0..UserStatus::ALL.len())];

        UserRecord {
            first_name: truncate(first_name, NAME_MAX_LEN),
            last_name: truncate(last_name, NAME_MAX_LEN),
            email,
            password_hash: truncate(password_hash, PASSWORD_MAX_LEN),
            date_of_birth: self.generate_date_of_birth(rng, now),
            status,
            last_login: self.generate_last_login(rng, now),
        }
    }

    /// Generates multiple users.
    pub fn generate_batch(
        &mut self,
        count: usize,
        rng: &mut impl Rng,
        now: OffsetDateTime,
    ) -> Vec<UserRecord> {
        (0..count).map(|_| self.generate(rng, now)).collect()
    }

    /// Draws an email this generator has not produced yet.
    fn generate_email(&mut self, rng: &mut impl Rng) -> String {
        for _ in 0..EMAIL_ATTEMPTS {
            let email: String = FreeEmail().fake_with_rng(rng);
            if email.len() <= EMAIL_MAX_LEN && self.seen_emails.insert(email.clone()) {
                return email;
            }
        }

        // Fall back to numbering the local part until it is free.
        let mut n = self.seen_emails.len();
        loop {
            let email = format!("user{n}@example.com");
            if self.seen_emails.insert(email.clone()) {
                return email;
            }
            n += 1;
        }
    }

    /// Generates a date of birth for an adult, normally distributed around
    /// the configured mean age.
    fn generate_date_of_birth(&self, rng: &mut impl Rng, now: OffsetDateTime) -> Date {
        let z: f64 = StandardNormal.sample(rng);
        let age = (self.config.age_mean + z * self.config.age_std) as i64;
        let age = age.clamp(self.config.min_age, self.config.max_age);

        let days = age * 365 + rng.gen_range(0..365);
        (now - Duration::days(days)).date()
    }

    /// Generates a last login timestamp inside the configured window.
    fn generate_last_login(&self, rng: &mut impl Rng, now: OffsetDateTime) -> PrimitiveDateTime {
        let window = self.config.last_login_window.whole_seconds().max(1);
        let ago = Duration::seconds(rng.gen_range(1..=window));
        let at = now - ago;

        PrimitiveDateTime::new(at.date(), at.time())
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Cuts `s` down to at most `max` characters.
fn truncate(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}
