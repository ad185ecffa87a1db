//! The capability for answering a user's financial question.

use async_trait::async_trait;

use crate::Error;

/// A free-text question asked on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// The user the question is about.
    pub user_id: String,
    /// The question as typed by the user.
    pub text: String,
}

impl Question {
    /// Trim the user ID and question text.
    ///
    /// # Errors
    /// Returns [Error::MissingField] if either is blank.
    pub fn new(user_id: &str, text: &str) -> Result<Self, Error> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(Error::MissingField("User ID"));
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(Error::MissingField("Question"));
        }

        Ok(Self {
            user_id: user_id.to_owned(),
            text: text.to_owned(),
        })
    }
}

/// Something that can answer questions, e.g. the finance service or the demo
/// backend.
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    /// Answer `question` with plain text.
    async fn answer(&self, question: &Question) -> Result<String, Error>;
}
