//! In-memory `FinanceApi` for exercising the app without a server.

use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use reqwest::{Method, StatusCode};

use super::{ApiError, ApiResult, FinanceApi};
use crate::models::{Budget, NewTransaction, SetBudgetRequest, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    ListTransactions,
    CreateTransaction,
    DeleteTransaction,
    ListBudgets,
    SetBudget,
}

#[derive(Default)]
struct Inner {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    calls: Vec<Call>,
    failing: Vec<Call>,
    next_id: u32,
}

/// Behaves like an upserting store. Calls listed via `fail_on` answer
/// with a 500.
#[derive(Default)]
pub(crate) struct FakeApi {
    inner: Mutex<Inner>,
}

#[allow(clippy::unwrap_used)]
impl FakeApi {
    pub(crate) fn with_data(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Self {
        let fake = Self::default();
        {
            let mut inner = fake.inner.lock().unwrap();
            inner.transactions = transactions;
            inner.budgets = budgets;
        }
        fake
    }

    pub(crate) fn fail_on(&self, call: Call) {
        self.inner.lock().unwrap().failing.push(call);
    }

    pub(crate) fn recover(&self) {
        self.inner.lock().unwrap().failing.clear();
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub(crate) fn stored_transactions(&self) -> Vec<Transaction> {
        self.inner.lock().unwrap().transactions.clone()
    }

    pub(crate) fn stored_budgets(&self) -> Vec<Budget> {
        self.inner.lock().unwrap().budgets.clone()
    }

    fn record(&self, call: Call, method: Method, path: &str) -> ApiResult<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.failing.contains(&call) {
            return Err(ApiError::Rejected {
                method,
                url: format!("http://fake{path}"),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(inner)
    }
}

impl FinanceApi for FakeApi {
    fn list_transactions(&self) -> ApiResult<Vec<Transaction>> {
        let inner = self.record(Call::ListTransactions, Method::GET, "/Transaction")?;
        Ok(inner.transactions.clone())
    }

    fn create_transaction(&self, txn: &NewTransaction) -> ApiResult<()> {
        let mut inner = self.record(Call::CreateTransaction, Method::POST, "/Transaction")?;
        inner.next_id += 1;
        let id = format!("t{}", inner.next_id);
        inner.transactions.push(Transaction {
            id,
            account_id: "fake-account".into(),
            amount: txn.amount,
            transaction_type: txn.transaction_type,
            category: txn.category.clone(),
            description: txn.description.clone(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        });
        Ok(())
    }

    fn delete_transaction(&self, id: &str) -> ApiResult<()> {
        let mut inner = self.record(Call::DeleteTransaction, Method::DELETE, "/Transaction")?;
        inner.transactions.retain(|t| t.id != id);
        Ok(())
    }

    fn list_budgets(&self) -> ApiResult<Vec<Budget>> {
        let inner = self.record(Call::ListBudgets, Method::GET, "/Budget")?;
        Ok(inner.budgets.clone())
    }

    fn set_budget(&self, req: &SetBudgetRequest) -> ApiResult<()> {
        let mut inner = self.record(Call::SetBudget, Method::POST, "/Budget")?;
        let existing = inner
            .budgets
            .iter_mut()
            .find(|b| b.category == req.category && b.month == req.month && b.year == req.year);
        match existing {
            Some(b) => b.amount = req.amount,
            None => {
                inner.next_id += 1;
                let id = format!("b{}", inner.next_id);
                inner.budgets.push(Budget {
                    id,
                    category: req.category.clone(),
                    amount: req.amount,
                    month: req.month,
                    year: req.year,
                });
            }
        }
        Ok(())
    }
}
