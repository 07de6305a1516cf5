pub mod parse;
pub use parse::CsvTransaction;

pub mod categories;
pub use categories::find_or_create_category;

pub mod import;
pub use import::{import_transactions, ImportError};

pub mod transactions;
pub use transactions::{create_transaction, delete_transaction, NewTransaction, TransactionError};
