//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use crate::{
    question::QuestionAnswerer,
    transaction::{TransactionRecorder, TransactionSource},
};

/// The state of the web server.
///
/// Handlers pick out the capability they need through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    /// Where the visualize page gets transactions from.
    pub transaction_source: Arc<dyn TransactionSource>,

    /// Where new transactions are sent.
    pub transaction_recorder: Arc<dyn TransactionRecorder>,

    /// What answers questions on the ask-a-question and chat pages.
    pub question_answerer: Arc<dyn QuestionAnswerer>,
}

impl AppState {
    /// Create a new [AppState] where every capability is served by `backend`.
    pub fn new<B>(backend: B) -> Self
    where
        B: TransactionSource + TransactionRecorder + QuestionAnswerer + 'static,
    {
        let backend = Arc::new(backend);

        Self {
            transaction_source: backend.clone(),
            transaction_recorder: backend.clone(),
            question_answerer: backend,
        }
    }
}
