use chrono::{SecondsFormat, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{AccountResolver, ApiError, ApiResult, FinanceApi};
use crate::models::{Budget, Category, NewTransaction, SetBudgetRequest, Transaction, TransactionType};

/// Blocking JSON client for the transaction/budget store.
///
/// One request per call: no retries, no timeout, no backoff.
pub(crate) struct HttpApi {
    http: Client,
    base_url: Url,
    account: Box<dyn AccountResolver>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTransactionBody<'a> {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    description: &'a str,
    category: &'a Category,
    transaction_type: TransactionType,
    account_id: String,
    date: String,
}

impl HttpApi {
    pub(crate) fn new(base_url: &str, account: Box<dyn AccountResolver>) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(ApiError::ClientInit)?;

        Ok(Self {
            http,
            base_url,
            account,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn execute(
        &self,
        method: Method,
        url: Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ApiResult<Response> {
        debug!(%method, %url, "sending request");
        let request = build(self.http.request(method.clone(), url.clone()));
        let response = request.send().map_err(|source| ApiError::Transport {
            method: method.clone(),
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%method, %url, %status, "request rejected");
            return Err(ApiError::Rejected {
                method,
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        let response = self.execute(Method::GET, url.clone(), |r| r)?;
        response.json().map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl FinanceApi for HttpApi {
    fn list_transactions(&self) -> ApiResult<Vec<Transaction>> {
        self.get_json(&["Transaction"])
    }

    fn create_transaction(&self, txn: &NewTransaction) -> ApiResult<()> {
        let url = self.endpoint(&["Transaction"])?;
        let body = CreateTransactionBody {
            amount: txn.amount,
            description: &txn.description,
            category: &txn.category,
            transaction_type: txn.transaction_type,
            account_id: self.account.current_account_id(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.execute(Method::POST, url, |r| r.json(&body))?;
        Ok(())
    }

    fn delete_transaction(&self, id: &str) -> ApiResult<()> {
        let url = self.endpoint(&["Transaction", id])?;
        self.execute(Method::DELETE, url, |r| r)?;
        Ok(())
    }

    fn list_budgets(&self) -> ApiResult<Vec<Budget>> {
        self.get_json(&["Budget"])
    }

    fn set_budget(&self, req: &SetBudgetRequest) -> ApiResult<()> {
        let url = self.endpoint(&["Budget"])?;
        self.execute(Method::POST, url, |r| r.json(req))?;
        Ok(())
    }
}

fn parse_base_url(base_url: &str) -> ApiResult<Url> {
    let url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme '{other}' in {base_url}"
            )))
        }
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ApiError::InvalidUrl(format!("{base_url} has no host")));
    }
    Ok(url)
}
