//! The transaction records exchanged with the finance service.

use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// A single monetary record with an amount and a category label.
///
/// The finance service sends amounts as text (e.g. `"50"`), so the amount is
/// parsed while decoding. Amounts that are not finite numbers are rejected,
/// which fails the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The value of the transaction in dollars.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// A free-form, case-sensitive grouping label.
    pub category: String,
}

impl Transaction {
    /// Create a transaction with `amount` in `category`.
    pub fn new(amount: f64, category: &str) -> Self {
        Self {
            amount,
            category: category.to_owned(),
        }
    }
}

/// The body of a successful `get_transactions` response.
///
/// A missing or null `transactions` field means the user has no transactions.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
}

impl TransactionsResponse {
    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions.unwrap_or_default()
    }
}

/// Parse a monetary amount from text.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` is not a finite number. Note that
/// Rust happily parses "NaN" and "inf", so those are rejected explicitly.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(amount) => Ok(amount),
        Amount::Text(text) => parse_amount(&text).map_err(serde::de::Error::custom),
    }
}

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

/// A transaction to record with the finance service.
///
/// Serializes to the JSON body the service's `update_user` route expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    /// The user the transaction belongs to.
    pub user_id: String,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// Whether the money came in or went out.
    pub transaction_type: TransactionType,
    /// A free-form grouping label.
    pub category: String,
    /// Text detailing the transaction.
    pub description: String,
}
