//! In-memory stand-ins for the service capabilities.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    Error,
    question::{Question, QuestionAnswerer},
    transaction::{NewTransaction, Transaction, TransactionRecorder, TransactionSource},
};

/// Returns the same transactions (or error) for every user and remembers
/// which users were asked for.
pub(crate) struct StubTransactionSource {
    result: Result<Vec<Transaction>, Error>,
    requested_user_ids: Mutex<Vec<String>>,
}

impl StubTransactionSource {
    pub(crate) fn returning(transactions: Vec<Transaction>) -> Self {
        Self {
            result: Ok(transactions),
            requested_user_ids: Mutex::default(),
        }
    }

    pub(crate) fn failing(error: Error) -> Self {
        Self {
            result: Err(error),
            requested_user_ids: Mutex::default(),
        }
    }

    pub(crate) fn requested_user_ids(&self) -> Vec<String> {
        self.requested_user_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionSource for StubTransactionSource {
    async fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, Error> {
        self.requested_user_ids
            .lock()
            .unwrap()
            .push(user_id.to_owned());

        self.result.clone()
    }
}

/// Keeps every transaction it is given, or fails every time.
#[derive(Default)]
pub(crate) struct RecordingLedger {
    recorded: Mutex<Vec<NewTransaction>>,
    error: Option<Error>,
}

impl RecordingLedger {
    pub(crate) fn failing(error: Error) -> Self {
        Self {
            recorded: Mutex::default(),
            error: Some(error),
        }
    }

    pub(crate) fn recorded(&self) -> Vec<NewTransaction> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionRecorder for RecordingLedger {
    async fn record_transaction(&self, transaction: &NewTransaction) -> Result<(), Error> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        self.recorded.lock().unwrap().push(transaction.clone());

        Ok(())
    }
}

/// Gives the same answer (or error) to every question and remembers what
/// was asked.
pub(crate) struct CannedAnswerer {
    answer: Result<String, Error>,
    asked: Mutex<Vec<Question>>,
}

impl CannedAnswerer {
    pub(crate) fn new(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_owned()),
            asked: Mutex::default(),
        }
    }

    pub(crate) fn failing(error: Error) -> Self {
        Self {
            answer: Err(error),
            asked: Mutex::default(),
        }
    }

    pub(crate) fn asked(&self) -> Vec<Question> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionAnswerer for CannedAnswerer {
    async fn answer(&self, question: &Question) -> Result<String, Error> {
        self.asked.lock().unwrap().push(question.clone());

        self.answer.clone()
    }
}
