//! Database handle shared by all modules.
//!
//! `DbHandle` owns one sqlx pool (SQLite or PostgreSQL, detected from the
//! DSN) and exposes a SeaORM `DatabaseConnection` built on top of the same
//! pool, so raw sqlx access and ORM access coexist without a second set of
//! connections.

use std::path::Path;
use std::time::Duration;

use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use thiserror::Error;

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    Sqlite,
}

/// Connection options covering the common sqlx pool knobs; each driver
/// applies the subset it supports.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool.
    pub max_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// SQLite-specific: busy timeout applied via PRAGMA busy_timeout.
    pub sqlite_busy_timeout: Option<Duration>,
    /// For SQLite file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            acquire_timeout: Some(Duration::from_secs(30)),
            sqlite_busy_timeout: Some(Duration::from_millis(5_000)),
            create_sqlite_dirs: true,
        }
    }
}

/// One concrete sqlx pool.
#[derive(Clone)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Main handle.
pub struct DbHandle {
    engine: DbEngine,
    pool: DbPool,
    sea: DatabaseConnection,
}

impl DbHandle {
    /// Detect engine by DSN scheme. The tail (credentials etc.) is never
    /// touched here.
    pub fn detect(dsn: &str) -> Result<DbEngine> {
        let s = dsn.trim_start();
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            Ok(DbEngine::Postgres)
        } else if s.starts_with("sqlite:") {
            Ok(DbEngine::Sqlite)
        } else {
            Err(DbError::UnknownDsn(dsn.to_string()))
        }
    }

    /// Connect and build the handle.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let engine = Self::detect(dsn)?;
        match engine {
            DbEngine::Postgres => {
                let mut o = PgPoolOptions::new();
                if let Some(n) = opts.max_conns {
                    o = o.max_connections(n);
                }
                if let Some(t) = opts.acquire_timeout {
                    o = o.acquire_timeout(t);
                }
                let pool = o.connect(dsn).await?;
                let sea = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
                Ok(Self {
                    engine,
                    pool: DbPool::Postgres(pool),
                    sea,
                })
            }
            DbEngine::Sqlite => {
                let connect = sqlite_connect_options(dsn, opts.create_sqlite_dirs)?;

                let mut o = SqlitePoolOptions::new();
                if let Some(n) = opts.max_conns {
                    o = o.max_connections(n);
                }
                if let Some(t) = opts.acquire_timeout {
                    o = o.acquire_timeout(t);
                }

                // Per-connection PRAGMAs.
                let busy = opts.sqlite_busy_timeout;
                o = o.after_connect(move |conn, _meta| {
                    Box::pin(async move {
                        sqlx::query("PRAGMA journal_mode = WAL")
                            .execute(&mut *conn)
                            .await?;
                        sqlx::query("PRAGMA synchronous = NORMAL")
                            .execute(&mut *conn)
                            .await?;
                        if let Some(ms) = busy {
                            // PRAGMA can't use bind parameters; numeric literal.
                            let ms = std::cmp::min(ms.as_millis(), i64::MAX as u128) as i64;
                            let stmt = format!("PRAGMA busy_timeout = {ms}");
                            sqlx::query(&stmt).execute(&mut *conn).await?;
                        }
                        Ok(())
                    })
                });

                let pool = o.connect_with(connect).await?;
                let sea = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
                Ok(Self {
                    engine,
                    pool: DbPool::Sqlite(pool),
                    sea,
                })
            }
        }
    }

    /// Graceful pool close. (Dropping the pool also closes it; this just
    /// makes it explicit.)
    pub async fn close(self) {
        match self.pool {
            DbPool::Postgres(p) => p.close().await,
            DbPool::Sqlite(p) => p.close().await,
        }
    }

    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    pub fn sqlx_postgres(&self) -> Option<&PgPool> {
        match self.pool {
            DbPool::Postgres(ref p) => Some(p),
            DbPool::Sqlite(_) => None,
        }
    }

    pub fn sqlx_sqlite(&self) -> Option<&SqlitePool> {
        match self.pool {
            DbPool::Sqlite(ref p) => Some(p),
            DbPool::Postgres(_) => None,
        }
    }

    /// SeaORM connection (cheap cloneable handle over the same pool).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }

    pub fn seaorm(&self) -> &DatabaseConnection {
        &self.sea
    }
}

/// Build sqlite connect options from a DSN, optionally creating parent
/// directories for file-backed databases. In-memory DSNs pass through.
fn sqlite_connect_options(dsn: &str, create_dirs: bool) -> Result<SqliteConnectOptions> {
    use std::str::FromStr;

    let is_memory = dsn.eq_ignore_ascii_case("sqlite::memory:")
        || dsn.eq_ignore_ascii_case("sqlite://:memory:");

    if !is_memory && create_dirs {
        let path = dsn
            .strip_prefix("sqlite://")
            .or_else(|| dsn.strip_prefix("sqlite:"))
            .unwrap_or(dsn);
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let opts = SqliteConnectOptions::from_str(dsn)
        .map_err(sqlx::Error::from)?
        .create_if_missing(true);
    Ok(opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_engines_by_scheme() {
        assert_eq!(
            DbHandle::detect("postgres://u:p@localhost/club").unwrap(),
            DbEngine::Postgres
        );
        assert_eq!(
            DbHandle::detect("postgresql://u:p@localhost/club").unwrap(),
            DbEngine::Postgres
        );
        assert_eq!(
            DbHandle::detect("sqlite://data/club.db").unwrap(),
            DbEngine::Sqlite
        );
        assert_eq!(
            DbHandle::detect("sqlite::memory:").unwrap(),
            DbEngine::Sqlite
        );
        assert!(DbHandle::detect("mongodb://localhost").is_err());
    }

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() {
        let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
            .await
            .unwrap();
        assert_eq!(db.engine(), DbEngine::Sqlite);
        assert!(db.sqlx_sqlite().is_some());
        assert!(db.sqlx_postgres().is_none());
        db.close().await;
    }

    #[tokio::test]
    async fn creates_parent_dirs_for_file_dsn() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/club.db");
        let dsn = format!("sqlite://{}", path.to_string_lossy());

        let db = DbHandle::connect(&dsn, ConnectOpts::default()).await.unwrap();
        assert!(path.parent().unwrap().exists());
        db.close().await;
    }
}
