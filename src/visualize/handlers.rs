use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, HeadElement, PAGE_CONTAINER_STYLE, PAGE_TITLE_STYLE,
        base, loading_spinner, user_id_input,
    },
    navigation::NavBar,
    transaction::TransactionSource,
    visualize::state::VisualizationState,
};

const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// The state needed for the visualize page.
#[derive(Clone)]
pub struct VisualizeState {
    pub transaction_source: Arc<dyn TransactionSource>,
}

impl FromRef<AppState> for VisualizeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_source: state.transaction_source.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VisualizeForm {
    pub user_id: String,
}

fn visualize_view(user_id: &str, state: VisualizationState) -> Markup {
    let nav_bar = NavBar::new(endpoints::VISUALIZE_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class=(PAGE_TITLE_STYLE) { "Visualize Your Data" }

            form
                method="post"
                action=(endpoints::VISUALIZE_API)
                hx-post=(endpoints::VISUALIZE_API)
                hx-target="#visualization"
                hx-target-error="#alert-container"
                hx-sync="this:drop"
                hx-disabled-elt="#visualize-button"
                hx-indicator="#visualization-indicator, #visualize-button-indicator"
                class={ (CARD_STYLE) " mb-8" }
            {
                (user_id_input("visualize-user-id", user_id))

                div class="flex items-center justify-end"
                {
                    button type="submit" id="visualize-button" class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="htmx-indicator" id="visualize-button-indicator" { (spinner) }
                        "Show Charts"
                    }
                }
            }

            div id="visualization-indicator" class="htmx-indicator"
            {
                (VisualizationState::Loading.into_html())
            }

            div id="visualization" { (state.into_html()) }
        }
    };

    base(
        "Visualize Data",
        &[HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())],
        &content,
    )
}

/// Display the visualize page with an empty chart panel.
pub async fn get_visualize_page() -> Response {
    visualize_view("", VisualizationState::Idle).into_response()
}

/// A route handler that fetches a user's transactions and charts them.
///
/// HTMX requests get the chart panel as a fragment. Plain form posts get the
/// whole page so the form still works without JavaScript.
pub async fn visualize_endpoint(
    State(state): State<VisualizeState>,
    HxRequest(is_htmx): HxRequest,
    Form(form): Form<VisualizeForm>,
) -> Response {
    let user_id = form.user_id.trim();
    if user_id.is_empty() {
        return Error::MissingField("User ID").into_alert_response();
    }

    let result = state.transaction_source.fetch_transactions(user_id).await;
    let visualization = VisualizationState::from_fetch(result);

    if is_htmx {
        visualization.into_html().into_response()
    } else {
        visualize_view(user_id, visualization).into_response()
    }
}
