pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod entry;
pub(crate) mod transactions;
