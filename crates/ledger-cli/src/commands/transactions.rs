use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use inquire::Confirm;

use ledger_data::{Category, CategoryFilter, Query, Transaction, TransactionFilter};
use ledger_db::Connection;
use ledger_services::{create_transaction, delete_transaction, import_transactions, NewTransaction};

use crate::formatting::PrintFormatted;

/// Pair transactions with their categories for display
async fn with_categories(
    db: &Connection,
    transactions: Vec<Transaction>,
) -> Result<Vec<(Transaction, Option<Category>)>> {
    let categories: Vec<Category> = db.query(&CategoryFilter::default()).await?;
    let rows = transactions
        .into_iter()
        .map(|tx| {
            let category = categories
                .iter()
                .find(|c| Some(&c.id) == tx.category_id.as_ref())
                .cloned();
            (tx, category)
        })
        .collect();
    Ok(rows)
}

#[derive(Args, Debug)]
pub struct ImportTransactions {
    /// CSV file with the columns title, type, value, category.
    /// The file is removed after a successful import.
    pub file: PathBuf,
}

impl ImportTransactions {
    /// Run the command and import the file
    pub async fn run(self, db: &Connection) -> Result<()> {
        let transactions = import_transactions(db, &self.file).await?;
        println!("{} transactions imported.", transactions.len());
        with_categories(db, transactions).await?.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddTransaction {
    #[clap(long)]
    pub title: String,
    #[clap(long, allow_negative_numbers = true)]
    pub value: f64,
    /// income or outcome
    #[clap(short = 't', long = "type")]
    pub kind: String,
    #[clap(short, long)]
    pub category: Option<String>,
}

impl AddTransaction {
    /// Run the command and add a transaction
    pub async fn run(self, db: &Connection) -> Result<()> {
        let transaction = create_transaction(
            db,
            NewTransaction {
                title: self.title,
                value: self.value,
                kind: self.kind.into(),
                category: self.category.unwrap_or_default(),
            },
        )
        .await?;
        let mut categories: Vec<Category> = match &transaction.category_id {
            Some(id) => {
                db.query(&CategoryFilter {
                    id: Some(id.clone()),
                    ..Default::default()
                })
                .await?
            }
            None => vec![],
        };
        let category = categories.pop();
        println!();
        (transaction, category).print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteTransaction {
    pub id: String,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteTransaction {
    /// Run the command and delete a transaction
    pub async fn run(self, db: &Connection) -> Result<()> {
        let mut found: Vec<Transaction> = db
            .query(&TransactionFilter {
                id: Some(self.id.clone()),
                ..Default::default()
            })
            .await?;

        if let (Some(transaction), false) = (found.pop(), self.yes) {
            let row = with_categories(db, vec![transaction]).await?;
            println!();
            row.print_formatted();
            println!();
            let confirm = Confirm::new("Delete transaction from database?").with_default(true);
            if !confirm.prompt()? {
                return Ok(());
            }
        }

        delete_transaction(db, &self.id).await?;
        println!("deleted {}", self.id);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListTransactions {
    /// Only transactions of this category
    #[clap(short, long)]
    pub category: Option<String>,
    /// Print as JSON
    #[clap(long)]
    pub json: bool,
}

impl ListTransactions {
    /// Run the command and list transactions
    pub async fn run(self, db: &Connection) -> Result<()> {
        let mut filter = TransactionFilter::default();
        if let Some(title) = self.category {
            let categories: Vec<Category> = db
                .query(&CategoryFilter {
                    title: Some(title.clone()),
                    ..Default::default()
                })
                .await?;
            let category = categories
                .first()
                .ok_or_else(|| anyhow::anyhow!("category {} not found", title))?;
            filter.category_id = Some(category.id.clone());
        }

        let transactions: Vec<Transaction> = db.query(&filter).await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&transactions)?);
            return Ok(());
        }

        println!("{} transactions.", transactions.len());
        with_categories(db, transactions).await?.print_formatted();
        Ok(())
    }
}
