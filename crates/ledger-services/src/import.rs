use std::io;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use thiserror::Error as ThisError;
use tracing::{info, warn};

use ledger_data::{Category, CategoryFilter, InsertAll, Query, Transaction};

use crate::categories::missing_category_titles;
use crate::parse::{parse, CsvTransaction};

/// ImportError type
#[derive(ThisError, Debug)]
pub enum ImportError {
    #[error("could not access import file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed import file: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ImportError {
    fn io(path: &Path, source: io::Error) -> Self {
        ImportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Read failures of the csv reader are reported as
    /// file access errors.
    fn from_csv(path: &Path, err: csv::Error) -> Self {
        if !err.is_io_error() {
            return ImportError::Csv(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(source) => ImportError::io(path, source),
            kind => ImportError::Store(anyhow!("unexpected csv error: {:?}", kind)),
        }
    }
}

/// Read all staging transactions from the file. Parsing runs
/// on the blocking pool and completes at the end of the file.
pub async fn read_transactions(path: &Path) -> Result<Vec<CsvTransaction>, ImportError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|err| ImportError::io(path, err))?;
    let file = file.into_std().await;

    let transactions = tokio::task::spawn_blocking(move || parse(file))
        .await
        .map_err(anyhow::Error::from)?
        .map_err(|err| ImportError::from_csv(path, err))?;
    Ok(transactions)
}

/// Bind a staging transaction to the first category
/// in the pool with a matching title.
fn bind_category(row: CsvTransaction, pool: &[Category]) -> Transaction {
    let category_id = pool
        .iter()
        .find(|category| category.title == row.category)
        .map(|category| category.id.clone());
    if category_id.is_none() {
        warn!(
            title = %row.title,
            category = %row.category,
            "no category for transaction"
        );
    }
    Transaction::new(&row.title, row.value, row.kind, category_id)
}

/// Import transactions from a CSV file with the columns
/// `title, type, value, category`.
///
/// Referenced categories are created if they do not exist.
/// All transactions are stored in a single write and the
/// file is removed afterwards. The stored transactions are
/// returned in file order.
pub async fn import_transactions<DB>(db: &DB, path: &Path) -> Result<Vec<Transaction>, ImportError>
where
    DB: Query<Category, Filter = CategoryFilter>
        + InsertAll<Category>
        + InsertAll<Transaction>
        + Send
        + Sync,
{
    let rows = read_transactions(path).await?;

    // Resolve categories: existing ones are looked up by title,
    // the others are created in one go.
    let referenced: Vec<String> = rows.iter().map(|row| row.category.clone()).collect();
    let mut lookup: Vec<String> = referenced.clone();
    lookup.sort();
    lookup.dedup();
    let existing: Vec<Category> = db.query(&CategoryFilter::titles(&lookup)).await?;

    let new_categories: Vec<Category> = missing_category_titles(&referenced, &existing)
        .iter()
        .map(|title| Category::new(title))
        .collect();
    let new_categories: Vec<Category> = db.insert_all(new_categories).await?;
    info!(
        created = new_categories.len(),
        existing = existing.len(),
        "resolved categories"
    );

    let pool: Vec<Category> = new_categories.into_iter().chain(existing).collect();
    let transactions: Vec<Transaction> = rows
        .into_iter()
        .map(|row| bind_category(row, &pool))
        .collect();
    let transactions: Vec<Transaction> = db.insert_all(transactions).await?;

    tokio::fs::remove_file(path)
        .await
        .map_err(|err| ImportError::io(path, err))?;

    info!(
        count = transactions.len(),
        path = %path.display(),
        "imported transactions"
    );
    Ok(transactions)
}
