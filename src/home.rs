//! The landing page that introduces each feature.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, PAGE_TITLE_STYLE, base, link},
    navigation::NavBar,
};

struct FeatureCard<'a> {
    title: &'a str,
    description: &'a str,
    url: &'a str,
}

impl FeatureCard<'_> {
    fn into_html(self) -> Markup {
        html!(
            div class={ (CARD_STYLE) " flex flex-col" }
            {
                h2 class="text-xl font-semibold mb-2 text-indigo-700 dark:text-indigo-300"
                {
                    (self.title)
                }

                p class="grow mb-4 text-gray-700 dark:text-gray-300" { (self.description) }

                p { (link(self.url, "Learn more")) }
            }
        )
    }
}

fn home_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let cards = [
        FeatureCard {
            title: "Update Transactions",
            description: "Record your income and expenses so your records stay up to date.",
            url: endpoints::UPDATE_TRANSACTION_VIEW,
        },
        FeatureCard {
            title: "Ask Questions",
            description: "Get answers to questions about your finances.",
            url: endpoints::ASK_QUESTION_VIEW,
        },
        FeatureCard {
            title: "Visualize Data",
            description: "See where your money goes with charts of your spending by category.",
            url: endpoints::VISUALIZE_VIEW,
        },
    ];

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class=(PAGE_TITLE_STYLE) { "Welcome to Finsight" }

            p class="mb-10 text-xl text-center text-gray-700 dark:text-gray-300"
            {
                "Manage your finances, get answers and understand your spending."
            }

            div class="grid grid-cols-1 md:grid-cols-3 gap-6"
            {
                @for card in cards {
                    (card.into_html())
                }
            }
        }
    };

    base("Home", &[], &content)
}

/// Display the landing page.
pub async fn get_home_page() -> Response {
    home_view().into_response()
}
