//! Transactions: the records fetched for charts and the form for recording new ones.

mod core;
mod source;
mod update_page;

pub use core::{NewTransaction, Transaction, TransactionType, TransactionsResponse};
pub use source::{TransactionRecorder, TransactionSource};
pub use update_page::{get_update_transaction_page, record_transaction_endpoint};
