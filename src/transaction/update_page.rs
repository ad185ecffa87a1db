//! The page and endpoint for recording a new transaction with the finance service.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, PAGE_TITLE_STYLE, base, clear_fields_on_success, format_currency,
        loading_spinner, user_id_input,
    },
    navigation::NavBar,
    transaction::{NewTransaction, TransactionRecorder, TransactionType, core::parse_amount},
};

/// The state needed for recording a transaction.
#[derive(Clone)]
pub struct RecordTransactionState {
    pub transaction_recorder: Arc<dyn TransactionRecorder>,
}

impl FromRef<AppState> for RecordTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_recorder: state.transaction_recorder.clone(),
        }
    }
}

/// The form data for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub user_id: String,
    /// The amount as typed by the user, parsed during validation.
    pub amount: String,
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TransactionForm {
    /// Check the required fields and parse the amount.
    ///
    /// # Errors
    /// Returns [Error::MissingField] for a blank user ID or category and
    /// [Error::InvalidAmount] if the amount is not a number.
    fn validate(self) -> Result<NewTransaction, Error> {
        let user_id = self.user_id.trim();
        if user_id.is_empty() {
            return Err(Error::MissingField("User ID"));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::MissingField("Category"));
        }

        let amount = parse_amount(&self.amount)?;

        Ok(NewTransaction {
            user_id: user_id.to_owned(),
            amount,
            transaction_type: self.transaction_type,
            category: category.to_owned(),
            description: self.description.unwrap_or_default().trim().to_owned(),
        })
    }
}

fn update_transaction_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::UPDATE_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class=(PAGE_TITLE_STYLE) { "Update Transactions" }

            form
                id="transaction-form"
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                hx-sync="this:drop"
                hx-disabled-elt="#submit-button"
                hx-indicator="#indicator"
                class=(CARD_STYLE)
            {
                (user_id_input("transaction-user-id", ""))

                div class="mb-6"
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="mb-6"
                {
                    label for="transaction-type" class=(FORM_LABEL_STYLE) { "Type" }

                    select
                        name="transaction_type"
                        id="transaction-type"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="expense" selected { "Expense" }
                        option value="income" { "Income" }
                    }
                }

                div class="mb-6"
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    input
                        name="category"
                        id="category"
                        type="text"
                        placeholder="e.g. Food"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="mb-6"
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="What was it for?"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="flex items-center justify-end"
                {
                    button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="htmx-indicator" id="indicator" { (spinner) }
                        "Save Transaction"
                    }
                }
            }

            (clear_fields_on_success("transaction-form", "input:not([name=user_id])"))
        }
    };

    base("Update Transactions", &[], &content)
}

/// Display the form for recording a transaction.
pub async fn get_update_transaction_page() -> Response {
    update_transaction_view().into_response()
}

/// A route handler for recording a transaction, responds with an alert.
pub async fn record_transaction_endpoint(
    State(state): State<RecordTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::debug!("rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state
        .transaction_recorder
        .record_transaction(&transaction)
        .await
    {
        tracing::error!("could not record transaction: {error}");
        return error.into_alert_response();
    }

    tracing::info!(
        "Recorded {:?} of {} in {:?}",
        transaction.transaction_type,
        transaction.amount,
        transaction.category
    );

    Alert::success(
        "Transaction saved",
        &format!(
            "Recorded {} in {}.",
            format_currency(transaction.amount),
            transaction.category
        ),
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;

    use crate::{
        Error, endpoints,
        test_utils::{
            RecordingLedger, assert_form_input, assert_form_submit_button, assert_hx_endpoint,
            assert_valid_html, must_get_form, parse_html_document, parse_html_fragment,
        },
        transaction::{NewTransaction, TransactionType},
    };

    use super::{
        RecordTransactionState, TransactionForm, get_update_transaction_page,
        record_transaction_endpoint,
    };

    fn form(amount: &str, category: &str) -> TransactionForm {
        TransactionForm {
            user_id: "42".to_owned(),
            amount: amount.to_owned(),
            transaction_type: TransactionType::Expense,
            category: category.to_owned(),
            description: Some("Lunch".to_owned()),
        }
    }

    #[tokio::test]
    async fn page_renders_form() {
        let response = get_update_transaction_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "user_id", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "category", "text");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn records_valid_transaction() {
        let ledger = Arc::new(RecordingLedger::default());
        let state = RecordTransactionState {
            transaction_recorder: ledger.clone(),
        };

        let response =
            record_transaction_endpoint(State(state), Form(form("19.5", " Food "))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert!(html.html().contains("Recorded $19.50 in Food."));
        assert_eq!(
            ledger.recorded(),
            vec![NewTransaction {
                user_id: "42".to_owned(),
                amount: 19.5,
                transaction_type: TransactionType::Expense,
                category: "Food".to_owned(),
                description: "Lunch".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn rejects_non_numeric_amount() {
        let ledger = Arc::new(RecordingLedger::default());
        let state = RecordTransactionState {
            transaction_recorder: ledger.clone(),
        };

        let response = record_transaction_endpoint(State(state), Form(form("abc", "Food"))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(ledger.recorded().is_empty());
    }

    #[tokio::test]
    async fn rejects_blank_category() {
        let ledger = Arc::new(RecordingLedger::default());
        let state = RecordTransactionState {
            transaction_recorder: ledger.clone(),
        };

        let response = record_transaction_endpoint(State(state), Form(form("10", "  "))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert!(html.html().contains("Category is required"));
    }

    #[tokio::test]
    async fn service_failure_shows_generic_error() {
        let ledger = Arc::new(RecordingLedger::failing(Error::BackendTimeout));
        let state = RecordTransactionState {
            transaction_recorder: ledger,
        };

        let response = record_transaction_endpoint(State(state), Form(form("10", "Food"))).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = parse_html_fragment(response).await;
        assert!(html.html().contains("Something went wrong"));
    }

    #[test]
    fn form_decodes_without_description() {
        let form: TransactionForm = serde_html_form::from_str(
            "user_id=7&amount=5&transaction_type=income&category=Salary&description=",
        )
        .unwrap();

        assert_eq!(form.transaction_type, TransactionType::Income);
        assert_eq!(form.description, None);
    }
}
