mod transactions;
pub use transactions::*;

mod categories;
pub use categories::*;
