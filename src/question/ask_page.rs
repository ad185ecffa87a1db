//! The single-shot page for asking one question and reading the answer.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, PAGE_TITLE_STYLE, base, clear_fields_on_success, loading_spinner,
        user_id_input,
    },
    navigation::NavBar,
    question::{Question, QuestionState},
};

/// The form data for asking a question.
#[derive(Debug, Deserialize)]
pub struct QuestionForm {
    pub user_id: String,
    pub question: String,
}

fn answer_card(answer: &str) -> Markup {
    html! {
        div class={ (CARD_STYLE) " mt-8" }
        {
            h2 class="text-2xl font-semibold mb-4 text-indigo-700 dark:text-indigo-300"
            {
                "Your Answer"
            }

            p class="text-gray-700 dark:text-gray-300 text-lg leading-relaxed" { (answer) }
        }
    }
}

fn guidance() -> Markup {
    html! {
        div class="p-6 rounded-lg shadow-lg text-white bg-gradient-to-br from-indigo-500 to-purple-600"
        {
            h2 class="text-2xl font-bold mb-4" { "How It Works" }

            ol class="list-decimal list-inside space-y-4"
            {
                li { "Enter your User ID in the form." }
                li { "Type your financial question in the text area." }
                li { "Click the \"Ask Question\" button to submit." }
                li { "Receive a personalized response based on your query." }
            }

            div class="mt-8"
            {
                h3 class="text-xl font-semibold mb-2" { "Tips for Great Questions" }

                ul class="list-disc list-inside space-y-2"
                {
                    li { "Be specific about your financial situation" }
                    li { "Provide relevant details (e.g., account types, goals)" }
                    li { "Ask one question at a time for clearer answers" }
                }
            }
        }
    }
}

fn ask_question_view(user_id: &str, answer: Option<&str>) -> Markup {
    let nav_bar = NavBar::new(endpoints::ASK_QUESTION_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class=(PAGE_TITLE_STYLE) { "Ask a Question" }

            div class="grid grid-cols-1 md:grid-cols-2 gap-8"
            {
                form
                    id="question-form"
                    method="post"
                    action=(endpoints::QUESTIONS_API)
                    hx-post=(endpoints::QUESTIONS_API)
                    hx-target="#answer"
                    hx-target-error="#alert-container"
                    hx-sync="this:drop"
                    hx-disabled-elt="#ask-button"
                    hx-indicator="#ask-indicator"
                    class=(CARD_STYLE)
                {
                    (user_id_input("question-user-id", user_id))

                    div class="mb-6"
                    {
                        label for="question" class=(FORM_LABEL_STYLE) { "Question" }

                        textarea
                            name="question"
                            id="question"
                            placeholder="Type your question here..."
                            required
                            class={ (FORM_TEXT_INPUT_STYLE) " h-32" }
                        {}
                    }

                    div class="flex items-center justify-end"
                    {
                        button type="submit" id="ask-button" class=(BUTTON_PRIMARY_STYLE)
                        {
                            span class="htmx-indicator" id="ask-indicator" { (spinner) }
                            "Ask Question"
                        }
                    }
                }

                (guidance())
            }

            (clear_fields_on_success("question-form", "textarea"))

            div id="answer"
            {
                @if let Some(answer) = answer {
                    (answer_card(answer))
                }
            }
        }
    };

    base("Ask a Question", &[], &content)
}

/// Display the form for asking a question.
pub async fn get_ask_question_page() -> Response {
    ask_question_view("", None).into_response()
}

/// A route handler for answering a question.
///
/// HTMX requests get the answer card as a fragment, plain form posts get the
/// whole page with the answer filled in.
pub async fn ask_question_endpoint(
    State(state): State<QuestionState>,
    HxRequest(is_htmx): HxRequest,
    Form(form): Form<QuestionForm>,
) -> Response {
    let question = match Question::new(&form.user_id, &form.question) {
        Ok(question) => question,
        Err(error) => {
            tracing::debug!("rejected question form: {error}");
            return error.into_alert_response();
        }
    };

    let answer = match state.question_answerer.answer(&question).await {
        Ok(answer) => answer,
        Err(error) => {
            tracing::error!("could not answer question: {error}");
            return error.into_alert_response();
        }
    };

    if is_htmx {
        answer_card(&answer).into_response()
    } else {
        ask_question_view(&question.user_id, Some(&answer)).into_response()
    }
}
