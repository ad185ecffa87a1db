//! The API endpoints URIs.

/// The landing page that links to each feature.
pub const ROOT: &str = "/";
/// The page for asking a single question.
pub const ASK_QUESTION_VIEW: &str = "/ask-question";
/// The chat-style page for asking a series of questions.
pub const CHAT_VIEW: &str = "/ask-question/chat";
/// The page for charting transactions per category.
pub const VISUALIZE_VIEW: &str = "/visualize-data";
/// The page for recording a new transaction.
pub const UPDATE_TRANSACTION_VIEW: &str = "/update-transaction";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for submitting a question from the single-shot form.
pub const QUESTIONS_API: &str = "/api/questions";
/// The route for submitting a message from the chat page.
pub const CHAT_API: &str = "/api/chat";
/// The route for fetching and charting a user's transactions.
pub const VISUALIZE_API: &str = "/api/visualize";
/// The route for recording a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::ASK_QUESTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CHAT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::VISUALIZE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::UPDATE_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);

        assert_endpoint_is_valid_uri(endpoints::QUESTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::CHAT_API);
        assert_endpoint_is_valid_uri(endpoints::VISUALIZE_API);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
    }
}
