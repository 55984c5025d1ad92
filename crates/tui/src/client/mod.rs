use api_types::{
    error::ErrorResponse,
    expense::{Expense, ExpenseNew, ExpensesReset},
};
use reqwest::{Response, Url};
use thiserror::Error;

use crate::{
    error::{AppError, Result},
    state::ExpenseApi,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    pub async fn expenses_list(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        let endpoint = self.endpoint("api/expenses")?;
        tracing::debug!("GET {endpoint}");

        let res = self.http.get(endpoint).send().await?;
        if res.status().is_success() {
            return Ok(res.json::<Vec<Expense>>().await?);
        }
        Err(error_from_response(res).await)
    }

    pub async fn expense_create(
        &self,
        payload: &ExpenseNew,
    ) -> std::result::Result<Expense, ClientError> {
        let endpoint = self.endpoint("api/expenses")?;
        tracing::debug!("POST {endpoint}");

        let res = self.http.post(endpoint).json(payload).send().await?;
        if res.status().is_success() {
            return Ok(res.json::<Expense>().await?);
        }
        Err(error_from_response(res).await)
    }

    pub async fn expenses_reset(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        let endpoint = self.endpoint("api/expenses/reset")?;
        tracing::debug!("POST {endpoint}");

        let res = self.http.post(endpoint).send().await?;
        if res.status().is_success() {
            return Ok(res.json::<ExpensesReset>().await?.data);
        }
        Err(error_from_response(res).await)
    }
}

async fn error_from_response(res: Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| format!("unexpected status {status}"));

    match status.as_u16() {
        400 | 422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}

impl ExpenseApi for Client {
    async fn list(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        self.expenses_list().await
    }

    async fn create(&self, payload: &ExpenseNew) -> std::result::Result<Expense, ClientError> {
        self.expense_create(payload).await
    }

    async fn reset(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        self.expenses_reset().await
    }
}
