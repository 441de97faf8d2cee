//! Row types for the seeded `users` table.

use std::fmt;

use time::{Date, PrimitiveDateTime};

/// Maximum lengths of the text columns, matching the table DDL.
pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 100;
pub const PASSWORD_MAX_LEN: usize = 100;
pub const STATUS_MAX_LEN: usize = 20;

/// Account status stored in the `status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    /// Every status a generated user may carry.
    pub const ALL: [UserStatus; 3] = [Self::Active, Self::Inactive, Self::Suspended];

    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user row ready for insertion.
///
/// `id` and `created_at` are assigned by the database and so are absent here.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Opaque placeholder, not a real password hash.
    pub password_hash: String,
    pub date_of_birth: Date,
    pub status: UserStatus,
    pub last_login: PrimitiveDateTime,
}
