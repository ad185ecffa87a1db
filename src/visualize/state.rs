//! The states the visualization panel moves through and how each is drawn.

use maud::{Markup, html};

use crate::{
    Error,
    html::{CARD_STYLE, format_currency, loading_spinner},
    transaction::Transaction,
    visualize::{
        aggregation::{CategoryTotal, aggregate},
        charts::{ChartData, build_charts, charts_view},
    },
};

/// The message shown when transactions could not be fetched.
///
/// The cause is logged on the server and never shown to the user.
pub const FETCH_FAILED_MESSAGE: &str = "Could not load your transactions. Please try again.";

/// What the visualization panel is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualizationState {
    /// No user ID has been submitted yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The fetch succeeded and returned at least one transaction.
    Loaded(Vec<CategoryTotal>),
    /// The fetch succeeded but the user has no transactions.
    Empty,
    /// The fetch failed. Holds the message to show the user.
    Failed(String),
}

impl VisualizationState {
    /// Settle the state from the result of fetching a user's transactions.
    pub fn from_fetch(result: Result<Vec<Transaction>, Error>) -> Self {
        match result {
            Ok(transactions) if transactions.is_empty() => Self::Empty,
            Ok(transactions) => Self::Loaded(aggregate(&transactions)),
            Err(error) => {
                tracing::error!("could not fetch transactions: {error}");
                Self::Failed(FETCH_FAILED_MESSAGE.to_owned())
            }
        }
    }

    /// Draw the panel for this state.
    pub fn into_html(self) -> Markup {
        match self {
            Self::Idle => html! {
                p class="text-center text-gray-600 dark:text-gray-400"
                {
                    "Enter your User ID to see your spending by category."
                }
            },
            Self::Loading => html! {
                p class="text-center text-gray-600 dark:text-gray-400"
                {
                    (loading_spinner())
                    "Loading your transactions..."
                }
            },
            Self::Loaded(totals) => {
                let charts = build_charts(&ChartData::from_totals(&totals));

                html! {
                    (charts_view(&charts))
                    (totals_table(&totals))
                }
            }
            Self::Empty => html! {
                p class="text-center text-gray-600 dark:text-gray-400"
                {
                    "No transactions found"
                }
            },
            Self::Failed(message) => html! {
                p role="alert" class="text-center text-red-700 dark:text-red-400"
                {
                    (message)
                }
            },
        }
    }
}

fn totals_table(totals: &[CategoryTotal]) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            table class="w-full text-sm text-left"
            {
                thead class="text-xs uppercase text-gray-700 dark:text-gray-400"
                {
                    tr
                    {
                        th scope="col" class="px-4 py-2" { "Category" }
                        th scope="col" class="px-4 py-2 text-right" { "Total" }
                    }
                }

                tbody
                {
                    @for total in totals {
                        tr class="border-t border-gray-200 dark:border-gray-700"
                        {
                            td class="px-4 py-2" { (total.category) }
                            td class="px-4 py-2 text-right" { (format_currency(total.total)) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{Error, transaction::Transaction, visualize::aggregation::CategoryTotal};

    use super::{FETCH_FAILED_MESSAGE, VisualizationState};

    fn render(state: VisualizationState) -> Html {
        Html::parse_fragment(&state.into_html().into_string())
    }

    fn has_charts(html: &Html) -> bool {
        let selector = Selector::parse("#charts").unwrap();
        html.select(&selector).next().is_some()
    }

    #[test]
    fn example_transactions_load_totals() {
        let state = VisualizationState::from_fetch(Ok(vec![
            Transaction::new(50.0, "Food"),
            Transaction::new(100.0, "Transport"),
            Transaction::new(200.0, "Entertainment"),
        ]));

        assert_eq!(
            state,
            VisualizationState::Loaded(vec![
                CategoryTotal {
                    category: "Food".to_owned(),
                    total: 50.0
                },
                CategoryTotal {
                    category: "Transport".to_owned(),
                    total: 100.0
                },
                CategoryTotal {
                    category: "Entertainment".to_owned(),
                    total: 200.0
                },
            ])
        );
    }

    #[test]
    fn no_transactions_is_empty_not_failed() {
        let state = VisualizationState::from_fetch(Ok(vec![]));

        assert_eq!(state, VisualizationState::Empty);
        let html = render(state);
        assert!(html.html().contains("No transactions found"));
        assert!(!has_charts(&html));
    }

    #[test]
    fn fetch_error_is_failed_without_charts() {
        let state = VisualizationState::from_fetch(Err(Error::BackendUnavailable(
            "connection refused".to_owned(),
        )));

        assert_eq!(
            state,
            VisualizationState::Failed(FETCH_FAILED_MESSAGE.to_owned())
        );
        let html = render(state);
        assert!(html.html().contains(FETCH_FAILED_MESSAGE));
        assert!(!html.html().contains("connection refused"));
        assert!(!has_charts(&html));
    }

    #[test]
    fn loaded_state_draws_charts_and_totals() {
        let html = render(VisualizationState::Loaded(vec![CategoryTotal {
            category: "Food".to_owned(),
            total: 70.0,
        }]));

        assert!(has_charts(&html));
        let cells: Vec<String> = html
            .select(&Selector::parse("td").unwrap())
            .map(|cell| cell.text().collect())
            .collect();
        assert_eq!(cells, vec!["Food", "$70.00"]);
    }

    #[test]
    fn markup_in_a_category_is_shown_as_text() {
        let category = "a</script><script>alert(1)</script>b";
        let html = render(VisualizationState::Loaded(vec![CategoryTotal {
            category: category.to_owned(),
            total: 5.0,
        }]));

        assert!(has_charts(&html));
        assert_eq!(html.select(&Selector::parse("script").unwrap()).count(), 1);
        let first_cell: String = html
            .select(&Selector::parse("td").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(first_cell, category);
    }

    #[test]
    fn idle_state_prompts_for_user_id() {
        let html = render(VisualizationState::Idle);

        assert!(html.html().contains("Enter your User ID"));
        assert!(!has_charts(&html));
    }
}
