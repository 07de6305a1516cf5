use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    AddTransaction, DeleteTransaction, ImportTransactions, ListCategories, ListTransactions,
};

#[derive(Parser, Debug)]
#[clap(name = "ledger", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Database file
    #[clap(long, env = "LEDGER_DB", default_value = "ledger.sqlite3")]
    pub db: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import transactions from a CSV file
    #[clap(name = "import")]
    Import(ImportTransactions),
    /// Add a transaction
    #[clap(name = "add")]
    Add(AddTransaction),
    /// Delete a transaction
    #[clap(name = "delete")]
    Delete(DeleteTransaction),
    /// List transactions
    #[clap(name = "list")]
    List(ListTransactions),
    /// List categories
    #[clap(name = "categories")]
    Categories(ListCategories),
}
