mod http;

use reqwest::{Method, StatusCode};

use crate::models::{Budget, NewTransaction, SetBudgetRequest, Transaction};

pub(crate) use http::HttpApi;

/// Account used when none is configured.
pub(crate) const DEFAULT_ACCOUNT_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {url} was rejected with status {status}")]
    Rejected {
        method: Method,
        url: String,
        status: StatusCode,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),
    #[error("failed to build HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// The remote transaction and budget store.
///
/// Implementations must be shareable across threads: the app fetches both
/// collections at once.
pub(crate) trait FinanceApi: Sync {
    fn list_transactions(&self) -> ApiResult<Vec<Transaction>>;
    fn create_transaction(&self, txn: &NewTransaction) -> ApiResult<()>;
    fn delete_transaction(&self, id: &str) -> ApiResult<()>;
    fn list_budgets(&self) -> ApiResult<Vec<Budget>>;
    fn set_budget(&self, req: &SetBudgetRequest) -> ApiResult<()>;
}

/// Fetch transactions and budgets at the same time. Either failure fails
/// the whole load.
pub(crate) fn fetch_all(api: &dyn FinanceApi) -> ApiResult<(Vec<Transaction>, Vec<Budget>)> {
    std::thread::scope(|s| -> ApiResult<_> {
        let budgets = s.spawn(|| api.list_budgets());
        let transactions = api.list_transactions();
        let budgets = budgets
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        Ok((transactions?, budgets?))
    })
}

/// Supplies the owning account for new transactions.
pub(crate) trait AccountResolver: Send + Sync {
    fn current_account_id(&self) -> String;
}

/// Always answers with the same account.
#[derive(Debug, Clone)]
pub(crate) struct FixedAccount(pub(crate) String);

impl AccountResolver for FixedAccount {
    fn current_account_id(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;
