use anyhow::Result;
use tracing_subscriber::EnvFilter;

use ledger_db::Connection;

mod cli;
mod commands;
mod formatting;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr, the tables go to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::init();

    let conn = Connection::open(&cli.db).await?;
    match cli.command {
        Command::Import(cmd) => cmd.run(&conn).await,
        Command::Add(cmd) => cmd.run(&conn).await,
        Command::Delete(cmd) => cmd.run(&conn).await,
        Command::List(cmd) => cmd.run(&conn).await,
        Command::Categories(cmd) => cmd.run(&conn).await,
    }?;

    Ok(())
}
