use sqlx::{migrate::MigrateDatabase, postgres::PgPoolOptions, PgPool, Postgres};
use std::str::FromStr;
use std::time::Duration;

/// Database pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl PoolConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(n) = parse_number(lookup("DB_MAX_CONNECTIONS")) {
            config.max_connections = n;
        }

        if let Some(n) = parse_number(lookup("DB_MIN_CONNECTIONS")) {
            config.min_connections = n;
        }

        if let Some(n) = parse_number(lookup("DB_ACQUIRE_TIMEOUT")) {
            config.acquire_timeout = Duration::from_secs(n);
        }

        config
    }
}

fn parse_number<T: FromStr>(value: Option<String>) -> Option<T> {
    value?.trim().parse().ok()
}

pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let config = PoolConfig::from_env();

    if !Postgres::database_exists(database_url).await? {
        Postgres::create_database(database_url).await?;
        tracing::info!("Database created successfully");
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .test_before_acquire(true)
        .connect(database_url)
        .await?;

    tracing::info!(
        "Database pool created: max={}, min={}, acquire_timeout={}s",
        config.max_connections,
        config.min_connections,
        config.acquire_timeout.as_secs()
    );

    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_config_overrides() {
        let config = PoolConfig::from_lookup(|key| match key {
            "DB_MAX_CONNECTIONS" => Some("25".to_string()),
            "DB_ACQUIRE_TIMEOUT" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_pool_config_rejects_out_of_range_counts() {
        // 2^32 does not fit in a u32 and must not wrap to 0
        let config = PoolConfig::from_lookup(|key| {
            (key == "DB_MAX_CONNECTIONS").then(|| "4294967296".to_string())
        });
        assert_eq!(config.max_connections, PoolConfig::default().max_connections);
    }
}
