mod budget;
mod category;
mod transaction;

pub use budget::{Budget, SetBudgetRequest};
pub use category::Category;
pub use transaction::{NewTransaction, Transaction, TransactionType};
