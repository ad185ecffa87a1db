//! Capabilities for reading and writing transactions.
//!
//! The views depend on these traits rather than on a concrete client so they
//! can be exercised without any network I/O.

use async_trait::async_trait;

use crate::{
    Error,
    transaction::{NewTransaction, Transaction},
};

/// Fetches a user's transactions.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Get every transaction recorded for `user_id`.
    ///
    /// An empty list means the user has no transactions. Any failure to get
    /// the list, including a malformed amount, is an error.
    async fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, Error>;
}

/// Records new transactions.
#[async_trait]
pub trait TransactionRecorder: Send + Sync {
    /// Send `transaction` to be stored.
    async fn record_transaction(&self, transaction: &NewTransaction) -> Result<(), Error>;
}
