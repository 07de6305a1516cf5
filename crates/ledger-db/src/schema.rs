use anyhow::Result;
use sqlx::Executor;
use tracing::debug;

use crate::Connection;

/// Install the database schema. Existing tables are kept.
pub async fn install(conn: &Connection) -> Result<()> {
    let mut conn = conn.lock().await;
    let schema_data = include_str!("../db/schema.sql");
    debug!("installing database schema");
    (&mut *conn).execute(schema_data).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_install_is_idempotent() {
        let conn = Connection::open_test().await;
        // open_test already installed the schema once
        install(&conn).await.unwrap();

        let mut c = conn.lock().await;
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&mut *c)
        .await
        .unwrap();
        let tables: Vec<String> = tables.into_iter().map(|(name,)| name).collect();
        assert_eq!(tables, vec!["categories", "transactions"]);
    }
}
