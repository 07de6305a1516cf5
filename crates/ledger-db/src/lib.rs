pub mod connection;
pub use connection::Connection;

pub mod results;
pub use results::QueryError;

pub mod schema;

pub mod categories;
pub mod transactions;
