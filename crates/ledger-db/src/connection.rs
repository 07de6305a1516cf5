use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::schema;

/// A thread safe connection to the database.
/// Clones share the same underlying connection.
#[derive(Debug, Clone)]
pub struct Connection(Arc<Mutex<SqliteConnection>>);

impl Connection {
    /// Open a connection to the database file. The file is
    /// created if missing and the schema is installed.
    pub async fn open<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let filename = filename.as_ref();
        let opts = SqliteConnectOptions::new()
            .filename(filename)
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = Self::connect_with(&opts).await?;
        info!(db = %filename.display(), "opened database");
        Ok(conn)
    }

    /// Open a new test database connection.
    /// The database lives in memory and is fresh on each open.
    #[cfg(any(test, feature = "test"))]
    pub async fn open_test() -> Self {
        use std::str::FromStr;

        let opts = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        Self::connect_with(&opts).await.unwrap()
    }

    async fn connect_with(opts: &SqliteConnectOptions) -> Result<Self> {
        let conn = SqliteConnection::connect_with(opts).await?;
        let conn = Self(Arc::new(Mutex::new(conn)));

        // Install the schema
        schema::install(&conn).await?;

        Ok(conn)
    }

    /// Acquire exclusive access to the underlying connection
    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.0.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.sqlite3");

        let conn = Connection::open(&path).await.unwrap();
        assert!(path.exists());
        drop(conn);

        // Reopening keeps the schema
        Connection::open(&path).await.unwrap();
    }
}
