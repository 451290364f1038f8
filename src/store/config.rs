use std::fmt;

use super::StoreError;

/// Connection settings for [`PgStore`](super::PgStore).
///
/// Built once at startup and handed to the store; nothing reads connection
/// settings from the environment after that.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    connection_string: String,
}

impl StoreConfig {
    /// Uses an explicit libpq-style connection string
    /// (`host=... port=... user=... dbname=...`).
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
        }
    }

    /// Builds the connection string from the standard libpq variables:
    /// - PGHOST (default: localhost)
    /// - PGPORT (default: 5432)
    /// - PGUSER (default: $USER)
    /// - PGPASSWORD (default: empty)
    /// - PGDATABASE (default: same as PGUSER)
    pub fn from_env() -> Result<Self, StoreError> {
        let user = std::env::var("PGUSER")
            .or_else(|_| std::env::var("USER"))
            .map_err(|_| StoreError::EnvNotSet("PGUSER or USER".to_string()))?;

        let host = std::env::var("PGHOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("PGPORT").unwrap_or_else(|_| "5432".to_string());
        let password = std::env::var("PGPASSWORD").unwrap_or_default();
        let database = std::env::var("PGDATABASE").unwrap_or_else(|_| user.clone());

        Ok(Self::new(build_connection_string(
            &host, &port, &user, &password, &database,
        )))
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Connection string with any password masked, for logging.
    pub fn redacted(&self) -> String {
        self.connection_string
            .split_whitespace()
            .map(|token| {
                if token.starts_with("password=") {
                    "password=***"
                } else {
                    token
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("connection_string", &self.redacted())
            .finish()
    }
}

fn build_connection_string(
    host: &str,
    port: &str,
    user: &str,
    password: &str,
    database: &str,
) -> String {
    if password.is_empty() {
        format!(
            "host={} port={} user={} dbname={}",
            host, port, user, database
        )
    } else {
        format!(
            "host={} port={} user={} password={} dbname={}",
            host, port, user, password, database
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_string_without_password() {
        assert_eq!(
            build_connection_string("db.local", "5433", "app", "", "textstats"),
            "host=db.local port=5433 user=app dbname=textstats"
        );
    }

    #[test]
    fn connection_string_with_password() {
        assert_eq!(
            build_connection_string("localhost", "5432", "app", "s3cret", "app"),
            "host=localhost port=5432 user=app password=s3cret dbname=app"
        );
    }

    #[test]
    fn redacted_masks_password() {
        let config = StoreConfig::new("host=localhost password=s3cret dbname=app");
        assert_eq!(
            config.redacted(),
            "host=localhost password=*** dbname=app"
        );
        assert!(!format!("{:?}", config).contains("s3cret"));
        assert_eq!(
            config.connection_string(),
            "host=localhost password=s3cret dbname=app"
        );
    }
}
