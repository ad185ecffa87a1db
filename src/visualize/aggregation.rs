//! Per-category aggregation of transaction amounts.

use std::collections::HashMap;

use serde::Serialize;

use crate::transaction::Transaction;

/// The sum of all transaction amounts sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The distinct category label.
    pub category: String,
    /// The sum of the amounts in `category`.
    pub total: f64,
}

/// Sums transaction amounts per category.
///
/// Categories are compared exactly (case-sensitive) and the output keeps the
/// order in which each category first appears in `transactions`. An empty
/// input gives an empty output.
pub fn aggregate(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions {
        match index_by_category.get(transaction.category.as_str()).copied() {
            Some(index) => totals[index].total += transaction.amount,
            None => {
                index_by_category.insert(&transaction.category, totals.len());
                totals.push(CategoryTotal {
                    category: transaction.category.clone(),
                    total: transaction.amount,
                });
            }
        }
    }

    totals
}
