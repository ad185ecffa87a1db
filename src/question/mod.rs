//! Asking financial questions, either one at a time or as a chat.

mod answerer;
mod ask_page;
mod chat_page;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::AppState;

pub use answerer::{Question, QuestionAnswerer};
pub use ask_page::{ask_question_endpoint, get_ask_question_page};
pub use chat_page::{chat_endpoint, get_chat_page};

/// The state needed for answering questions.
#[derive(Clone)]
pub struct QuestionState {
    pub question_answerer: Arc<dyn QuestionAnswerer>,
}

impl FromRef<AppState> for QuestionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            question_answerer: state.question_answerer.clone(),
        }
    }
}
