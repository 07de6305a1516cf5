// Operations
mod operations;
pub use operations::*;

// Models
mod categories;
pub use categories::*;

mod transactions;
pub use transactions::*;
