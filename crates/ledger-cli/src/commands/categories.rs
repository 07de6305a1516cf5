use anyhow::Result;
use clap::Args;

use ledger_data::{Category, CategoryFilter, Query};
use ledger_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct ListCategories {
    /// Print as JSON
    #[clap(long)]
    pub json: bool,
}

impl ListCategories {
    /// Run the command and list categories
    pub async fn run(self, db: &Connection) -> Result<()> {
        let categories: Vec<Category> = db.query(&CategoryFilter::default()).await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&categories)?);
            return Ok(());
        }
        println!("{} categories.", categories.len());
        categories.print_formatted();
        Ok(())
    }
}
