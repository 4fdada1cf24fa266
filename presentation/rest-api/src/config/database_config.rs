use anyhow::Context;
use persistence::db::{DEFAULT_MAX_CONNECTIONS, DatabaseConfig, connect};
use sqlx::PgPool;

use super::env_vars::{parse_or, process_env};

/// Build the recipe store configuration from environment variables
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
/// - DATABASE_MAX_CONNECTIONS: Pool size (default: 5)
/// - DATABASE_MIGRATIONS_PATH: Migrations directory, applied on startup when set
pub fn database_config_from_vars<F: Fn(&str) -> Option<String>>(
    lookup: &F,
) -> anyhow::Result<DatabaseConfig> {
    let db_url = lookup("DATABASE_URL")
        .filter(|url| !url.trim().is_empty())
        .context("DATABASE_URL must be set")?;

    let mut config = DatabaseConfig::new(db_url).with_max_connections(parse_or(
        lookup,
        "DATABASE_MAX_CONNECTIONS",
        DEFAULT_MAX_CONNECTIONS,
    ));
    if let Some(path) = lookup("DATABASE_MIGRATIONS_PATH").filter(|path| !path.trim().is_empty()) {
        config = config.with_migrations_path(path);
    }
    Ok(config)
}

/// Initialize database connection pool from environment variables
///
/// # Errors
/// Returns error if DATABASE_URL is not set, the connection fails or a
/// configured migration cannot be applied
pub async fn init_database() -> anyhow::Result<PgPool> {
    let config = database_config_from_vars(&process_env)?;
    let pool = connect(&config).await?;
    tracing::info!(
        max_connections = config.max_connections,
        migrated = config.migrations_path.is_some(),
        "Recipe store connected"
    );
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_vars::lookup_from;
    use std::path::PathBuf;

    #[test]
    fn should_require_database_url() {
        let result = database_config_from_vars(&lookup_from(&[]));

        assert!(result.is_err());
    }

    #[test]
    fn should_read_pool_size_and_migrations_path() {
        let config = database_config_from_vars(&lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/recipes"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("DATABASE_MIGRATIONS_PATH", "infrastructure/persistence/migrations"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 12);
        assert_eq!(
            config.migrations_path,
            Some(PathBuf::from("infrastructure/persistence/migrations"))
        );
    }
}
