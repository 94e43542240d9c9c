//! Postgres store implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures, checkout timeouts included
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, warn};
use std::time::Duration;
use tokio::task;

use crate::db::filter::VillaFilter;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::db::store::EntityStore;
use crate::models::{NewVilla, Villa, VillaId};

mod models;
mod schema;

use models::{NewVillaRow, VillaChangeset, VillaRow};
use schema::villas;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/stores/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// See the module documentation for the variables and their defaults.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed villa store for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresStore {
    /// Create a new store and run pending migrations.
    ///
    /// This blocks while the pool fills and migrations run; call it from a
    /// blocking context.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Run `f` on a pooled connection inside `spawn_blocking`.
    ///
    /// Retryable failures (checkout timeouts, serialization conflicts) are
    /// attempted again up to `max_retries` times, the delay doubling from
    /// `retry_delay_ms`.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        task::spawn_blocking(move || {
            let mut attempt = 0;
            loop {
                let result = match pool.get() {
                    Ok(mut conn) => f.clone()(&mut conn),
                    Err(e) => Err(checkout_timeout(e.to_string(), attempt + 1)),
                };
                match result {
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        warn!("Retrying after {} (attempt {})", e, attempt + 1);
                        std::thread::sleep(delay);
                        delay *= 2;
                        attempt += 1;
                    }
                    other => return other,
                }
            }
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

/// r2d2 only fails a checkout once `connection_timeout` has elapsed.
fn checkout_timeout(message: String, attempt: u32) -> RepositoryError {
    RepositoryError::timeout_with_context(
        message,
        ErrorContext::new("get_connection").with_details(format!("attempt={}", attempt)),
    )
}

fn villa_context(operation: &str, id: VillaId) -> ErrorContext {
    ErrorContext::new(operation)
        .with_entity("villa")
        .with_entity_id(id)
}

#[async_trait]
impl EntityStore<Villa> for PostgresStore {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(|e| RepositoryError::from(e).with_operation("health_check"))
        })
        .await
    }

    async fn list(&self) -> RepositoryResult<Vec<Villa>> {
        self.with_conn(|conn| {
            let rows = villas::table
                .select(VillaRow::as_select())
                .order(villas::id.asc())
                .load::<VillaRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("list"))?;
            Ok(rows.into_iter().map(Villa::from).collect())
        })
        .await
    }

    async fn find(&self, filter: &VillaFilter) -> RepositoryResult<Option<Villa>> {
        let filter = filter.clone();
        debug!("find {:?}", filter);
        self.with_conn(move |conn| {
            let query = villas::table.select(VillaRow::as_select()).into_boxed();
            let query = match filter {
                VillaFilter::ById(id) => query.filter(villas::id.eq(id.value())),
                VillaFilter::ByName(name) => query.filter(villas::name.eq(name)),
            };
            let row = query
                .order(villas::id.asc())
                .first::<VillaRow>(conn)
                .optional()
                .map_err(|e| RepositoryError::from(e).with_operation("find"))?;
            Ok(row.map(Villa::from))
        })
        .await
    }

    async fn insert(&self, draft: NewVilla) -> RepositoryResult<Villa> {
        let row = NewVillaRow::from_draft(draft, Utc::now());
        self.with_conn(move |conn| {
            let inserted = diesel::insert_into(villas::table)
                .values(&row)
                .returning(VillaRow::as_returning())
                .get_result::<VillaRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("insert"))?;
            debug!("Inserted villa id={}", inserted.id);
            Ok(Villa::from(inserted))
        })
        .await
    }

    async fn replace(&self, villa: &Villa) -> RepositoryResult<()> {
        let id = villa.id;
        let changes = VillaChangeset::from(villa);
        self.with_conn(move |conn| {
            let updated = diesel::update(villas::table.filter(villas::id.eq(id.value())))
                .set(&changes)
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("replace"))?;
            if updated == 0 {
                return Err(RepositoryError::not_found_with_context(
                    format!("Villa {} not found", id),
                    villa_context("replace", id),
                ));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: VillaId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(villas::table.filter(villas::id.eq(id.value())))
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("delete"))?;
            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    format!("Villa {} not found", id),
                    villa_context("delete", id),
                ));
            }
            debug!("Deleted villa id={}", id);
            Ok(())
        })
        .await
    }
}
