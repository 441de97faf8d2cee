//! SQL text for the seeded table.

/// PostgreSQL truncates identifiers longer than this.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Returns true if `name` can be spliced into SQL as an unquoted identifier.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');

    starts_ok
        && name.len() <= MAX_IDENTIFIER_LEN
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {table}")
}

pub fn create_table_sql(table: &str) -> String {
    format!(
        r#"
        CREATE TABLE {table} (
            id SERIAL PRIMARY KEY,
            first_name VARCHAR(50),
            last_name VARCHAR(50),
            email VARCHAR(100) UNIQUE,
            password_hash VARCHAR(100),
            date_of_birth DATE,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            status VARCHAR(20),
            last_login TIMESTAMP
        )
        "#
    )
}

/// Insert of the seven client-supplied columns; `id` and `created_at` are
/// filled in by the database.
pub fn insert_sql(table: &str) -> String {
    format!(
        r#"
        INSERT INTO {table} (
            first_name, last_name, email, password_hash,
            date_of_birth, status, last_login
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_validation() {
        assert!(is_valid_table_name("users"));
        assert!(is_valid_table_name("_users_2"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("2users"));
        assert!(!is_valid_table_name("users; DROP TABLE x"));
        assert!(!is_valid_table_name("public.users"));
        assert!(!is_valid_table_name(&"u".repeat(64)));
        assert!(is_valid_table_name(&"u".repeat(63)));
    }

    #[test]
    fn test_drop_table_sql() {
        assert_eq!(drop_table_sql("users"), "DROP TABLE IF EXISTS users");
    }

    #[test]
    fn test_create_table_columns() {
        let sql = create_table_sql("users");
        assert!(sql.contains("CREATE TABLE users ("));

        let columns = [
            "id SERIAL PRIMARY KEY",
            "first_name VARCHAR(50)",
            "last_name VARCHAR(50)",
            "email VARCHAR(100) UNIQUE",
            "password_hash VARCHAR(100)",
            "date_of_birth DATE",
            "created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP",
            "status VARCHAR(20)",
            "last_login TIMESTAMP",
        ];
        for column in columns {
            assert!(sql.contains(column), "missing column {column}");
        }
        assert_eq!(sql.matches(',').count(), columns.len() - 1);
    }

    #[test]
    fn test_insert_sql_parameters() {
        let sql = insert_sql("users");
        assert!(sql.contains("INSERT INTO users ("));
        assert!(sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7)"));
        assert!(!sql.contains("$8"));
        assert!(!sql.contains("created_at"));
    }
}
