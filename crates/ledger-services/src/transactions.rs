use thiserror::Error as ThisError;
use tracing::info;

use ledger_data::{
    Category, CategoryFilter, Delete, Insert, Query, Transaction, TransactionFilter,
    TransactionType,
};

use crate::categories::find_or_create_category;

/// TransactionError type
#[derive(ThisError, Debug)]
pub enum TransactionError {
    #[error("Transaction does not exists.")]
    NotFound(String),

    #[error("invalid transaction: {0}")]
    Invalid(String),

    #[error("invalid transaction type {0:?}, expected income or outcome")]
    InvalidType(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Delete a single transaction by id. Fails with
/// `NotFound` if there is no such transaction.
pub async fn delete_transaction<DB>(db: &DB, id: &str) -> Result<(), TransactionError>
where
    DB: Query<Transaction, Filter = TransactionFilter> + Delete<Transaction> + Send + Sync,
{
    let transaction: Transaction = db
        .query(&TransactionFilter {
            id: Some(id.to_string()),
            ..Default::default()
        })
        .await?
        .pop()
        .ok_or_else(|| TransactionError::NotFound(id.to_string()))?;

    db.delete(transaction).await?;
    info!(id, "deleted transaction");
    Ok(())
}

/// Input for a manually entered transaction
#[derive(Debug, Default, Clone)]
pub struct NewTransaction {
    pub title: String,
    pub value: f64,
    pub kind: TransactionType,
    pub category: String,
}

/// Create a single transaction. The category is looked up
/// by title and created if missing; an empty title leaves
/// the transaction without category.
pub async fn create_transaction<DB>(
    db: &DB,
    input: NewTransaction,
) -> Result<Transaction, TransactionError>
where
    DB: Query<Category, Filter = CategoryFilter>
        + Insert<Category>
        + Insert<Transaction>
        + Send
        + Sync,
{
    let title = input.title.trim();
    if title.is_empty() {
        return Err(TransactionError::Invalid("title must not be empty".into()));
    }
    if !input.value.is_finite() {
        return Err(TransactionError::Invalid(format!(
            "value {} is not a number",
            input.value
        )));
    }
    if !input.kind.is_known() {
        return Err(TransactionError::InvalidType(input.kind.to_string()));
    }

    let category = input.category.trim();
    let category_id = if category.is_empty() {
        None
    } else {
        Some(find_or_create_category(db, category).await?.id)
    };

    let transaction = db
        .insert(Transaction::new(title, input.value, input.kind, category_id))
        .await?;
    info!(id = %transaction.id, title = %transaction.title, "created transaction");
    Ok(transaction)
}
