use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteConnection, Connection as SqlConnection, QueryBuilder, Sqlite};

use ledger_data::{Delete, Insert, InsertAll, Query, Retrieve, Transaction, TransactionFilter};

use crate::{Connection, QueryError};

/// Write a single transaction row
async fn insert_transaction(conn: &mut SqliteConnection, transaction: &Transaction) -> Result<()> {
    let mut qry = QueryBuilder::<Sqlite>::new(
        r#"INSERT INTO transactions (
            id,
            title,
            value,
            type,
            category_id,
            created_at,
            updated_at
        ) VALUES (
        "#,
    );
    qry.separated(", ")
        .push_bind(&transaction.id)
        .push_bind(&transaction.title)
        .push_bind(transaction.value)
        .push_bind(transaction.kind.as_str())
        .push_bind(&transaction.category_id)
        .push_bind(transaction.created_at)
        .push_bind(transaction.updated_at);
    qry.push(")").build().execute(conn).await?;
    Ok(())
}

#[async_trait]
impl Query<Transaction> for Connection {
    type Filter = TransactionFilter;

    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Transaction>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                id,
                title,
                value,
                type,
                category_id,
                created_at,
                updated_at
            FROM transactions
            WHERE 1
            "#,
        );
        if let Some(id) = filter.id.clone() {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(category_id) = filter.category_id.clone() {
            qry.push(" AND category_id = ").push_bind(category_id);
        }
        qry.push(" ORDER BY rowid");

        let transactions: Vec<Transaction> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(transactions)
    }
}

#[async_trait]
impl Retrieve<Transaction> for Connection {
    type Key = String;

    async fn retrieve(&self, id: Self::Key) -> Result<Transaction> {
        let filter = TransactionFilter {
            id: Some(id),
            ..Default::default()
        };
        let mut transactions: Vec<Transaction> = self.query(&filter).await?;
        if transactions.len() > 1 {
            return Err(QueryError::Ambiguous(transactions.len()).into());
        }
        let transaction = transactions.pop().ok_or(QueryError::NotFound)?;
        Ok(transaction)
    }
}

#[async_trait]
impl Insert<Transaction> for Connection {
    async fn insert(&self, transaction: Transaction) -> Result<Transaction> {
        {
            let mut conn = self.lock().await;
            insert_transaction(&mut conn, &transaction).await?;
        }
        self.retrieve(transaction.id).await
    }
}

#[async_trait]
impl InsertAll<Transaction> for Connection {
    async fn insert_all(&self, transactions: Vec<Transaction>) -> Result<Vec<Transaction>> {
        if transactions.is_empty() {
            return Ok(transactions);
        }
        let mut conn = self.lock().await;
        let mut tx = conn.begin().await?;
        for transaction in &transactions {
            insert_transaction(&mut tx, transaction).await?;
        }
        tx.commit().await?;
        Ok(transactions)
    }
}

#[async_trait]
impl Delete<Transaction> for Connection {
    /// Delete a transaction
    async fn delete(&self, transaction: Transaction) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM transactions WHERE id = ")
            .push_bind(transaction.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
