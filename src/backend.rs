//! Implementations of the service capabilities.
//!
//! [HttpBackend] talks to the finance service over HTTP. [DemoBackend] needs
//! no service at all: it answers with a canned reply after a short delay and
//! serves a fixed set of transactions.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::{
    Error,
    question::{Question, QuestionAnswerer},
    transaction::{
        NewTransaction, Transaction, TransactionRecorder, TransactionSource, TransactionsResponse,
    },
};

/// The default time to wait for the finance service to respond.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The default time the demo backend takes to answer a question.
pub const DEFAULT_ANSWER_DELAY: Duration = Duration::from_secs(1);

/// The body the finance service sends back from `query` and `update_user`.
///
/// Either field may be missing. An `error` means the request failed even if
/// the status code says otherwise.
#[derive(Debug, Default, Deserialize)]
struct ServiceReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// A client for the finance service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the finance service at `base_url`, e.g.
    /// `http://127.0.0.1:5000`.
    ///
    /// Requests that take longer than `timeout` fail with
    /// [Error::BackendTimeout].
    ///
    /// # Errors
    /// Returns an error if the HTTP client could not be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

/// Check the finance service's reply for an error.
///
/// An `error` field in the body takes precedence over the status code, since
/// the service sometimes reports errors with a 200.
async fn read_reply(response: Response) -> Result<ServiceReply, Error> {
    let status = response.status();
    let reply = response.json::<ServiceReply>().await;

    if let Ok(ServiceReply {
        error: Some(message),
        ..
    }) = &reply
    {
        return Err(Error::BackendError(message.clone()));
    }

    if !status.is_success() {
        return Err(Error::BackendStatus(status.as_u16()));
    }

    Ok(reply?)
}

#[async_trait]
impl TransactionSource for HttpBackend {
    async fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, Error> {
        tracing::debug!("fetching transactions for user {user_id}");

        let response = self
            .client
            .get(self.url("get_transactions"))
            .query(&[("user_id", user_id)])
            .send()
            .await?
            .error_for_status()?;

        let body: TransactionsResponse = response.json().await?;

        Ok(body.into_transactions())
    }
}

#[async_trait]
impl QuestionAnswerer for HttpBackend {
    async fn answer(&self, question: &Question) -> Result<String, Error> {
        tracing::debug!("asking question for user {}", question.user_id);

        let response = self
            .client
            .post(self.url("query"))
            .form(&[
                ("user_id", question.user_id.as_str()),
                ("question", question.text.as_str()),
            ])
            .send()
            .await?;

        read_reply(response).await?.response.ok_or_else(|| {
            Error::InvalidResponse("the reply to a query had no response".to_owned())
        })
    }
}

#[async_trait]
impl TransactionRecorder for HttpBackend {
    async fn record_transaction(&self, transaction: &NewTransaction) -> Result<(), Error> {
        tracing::debug!("recording transaction for user {}", transaction.user_id);

        let response = self
            .client
            .post(self.url("update_user"))
            .json(transaction)
            .send()
            .await?;

        read_reply(response).await.map(|_| ())
    }
}

/// A stand-in for the finance service for demos and local development.
#[derive(Debug, Clone)]
pub struct DemoBackend {
    answer_delay: Duration,
}

impl DemoBackend {
    /// Create a demo backend that takes `answer_delay` to answer a question.
    pub fn new(answer_delay: Duration) -> Self {
        Self { answer_delay }
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ANSWER_DELAY)
    }
}

#[async_trait]
impl QuestionAnswerer for DemoBackend {
    async fn answer(&self, question: &Question) -> Result<String, Error> {
        tokio::time::sleep(self.answer_delay).await;

        Ok(format!(
            "Here's a response for user {}: {}",
            question.user_id, question.text
        ))
    }
}

#[async_trait]
impl TransactionSource for DemoBackend {
    async fn fetch_transactions(&self, _user_id: &str) -> Result<Vec<Transaction>, Error> {
        Ok(vec![
            Transaction::new(50.0, "Food"),
            Transaction::new(100.0, "Transport"),
            Transaction::new(200.0, "Entertainment"),
        ])
    }
}

#[async_trait]
impl TransactionRecorder for DemoBackend {
    async fn record_transaction(&self, transaction: &NewTransaction) -> Result<(), Error> {
        tracing::info!("demo backend accepted transaction: {transaction:?}");

        Ok(())
    }
}
