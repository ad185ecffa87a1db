//! A chat-style page where each question and its answer are appended to a
//! running transcript.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use maud::{Markup, html};
use serde::Deserialize;
use time::{OffsetDateTime, Time, macros::format_description};

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

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sender {
    User,
    Assistant,
}

fn message_bubble(sender: Sender, text: &str, sent_at: Time) -> Markup {
    let (row_style, bubble_style, name) = match sender {
        Sender::User => (
            "flex justify-end",
            "bg-indigo-600 text-white",
            "You",
        ),
        Sender::Assistant => (
            "flex justify-start",
            "bg-gray-100 text-gray-900 dark:bg-gray-700 dark:text-white",
            "Finsight",
        ),
    };

    html! {
        div class={ (row_style) " mb-4" } data-sender=(name)
        {
            div class={ "max-w-[80%] px-4 py-2 rounded-lg " (bubble_style) }
            {
                p class="text-xs font-semibold opacity-75"
                {
                    (name) " · " (format_time(sent_at))
                }

                p class="whitespace-pre-wrap" { (text) }
            }
        }
    }
}

fn format_time(time: Time) -> String {
    let format = format_description!("[hour]:[minute]");

    time.format(format).unwrap_or_else(|error| {
        tracing::warn!("could not format message time: {error}");
        String::new()
    })
}

/// The current wall clock time, in the server's local timezone if it can be
/// determined.
fn now() -> Time {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .time()
}

/// The question and its answer as a pair of chat bubbles.
fn exchange(question: &Question, answer: &str, asked_at: Time, answered_at: Time) -> Markup {
    html! {
        (message_bubble(Sender::User, &question.text, asked_at))
        (message_bubble(Sender::Assistant, answer, answered_at))
    }
}

fn chat_view(user_id: &str, transcript: Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::CHAT_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class=(PAGE_TITLE_STYLE) { "Chat" }

            div class={ (CARD_STYLE) " mb-6" }
            {
                div
                    id="chat-transcript"
                    class="min-h-[240px] max-h-[60vh] overflow-y-auto"
                    aria-live="polite"
                {
                    (transcript)
                }
            }

            form
                id="chat-form"
                method="post"
                action=(endpoints::CHAT_API)
                hx-post=(endpoints::CHAT_API)
                hx-target="#chat-transcript"
                hx-swap="beforeend scroll:bottom"
                hx-target-error="#alert-container"
                hx-sync="this:drop"
                hx-disabled-elt="#send-button"
                hx-indicator="#send-indicator"
                class=(CARD_STYLE)
            {
                (user_id_input("chat-user-id", user_id))

                div class="mb-6"
                {
                    label for="message" class=(FORM_LABEL_STYLE) { "Message" }

                    textarea
                        name="message"
                        id="message"
                        placeholder="Ask about your finances..."
                        required
                        class={ (FORM_TEXT_INPUT_STYLE) " h-24" }
                    {}
                }

                div class="flex items-center justify-end"
                {
                    button type="submit" id="send-button" class=(BUTTON_PRIMARY_STYLE)
                    {
                        span class="htmx-indicator" id="send-indicator" { (spinner) }
                        "Send"
                    }
                }
            }

            (clear_fields_on_success("chat-form", "textarea"))
        }
    };

    base("Chat", &[], &content)
}

/// Display the chat page with an empty transcript.
pub async fn get_chat_page() -> Response {
    chat_view("", html! {}).into_response()
}

/// A route handler that answers a chat message.
///
/// HTMX requests get the new pair of messages to append to the transcript.
/// Plain form posts get the whole page showing just the latest exchange,
/// since the transcript lives only in the browser.
pub async fn chat_endpoint(
    State(state): State<QuestionState>,
    HxRequest(is_htmx): HxRequest,
    Form(form): Form<ChatForm>,
) -> Response {
    let question = match Question::new(&form.user_id, &form.message) {
        Ok(question) => question,
        Err(error) => {
            tracing::debug!("rejected chat message: {error}");
            return error.into_alert_response();
        }
    };

    let asked_at = now();
    let answer = match state.question_answerer.answer(&question).await {
        Ok(answer) => answer,
        Err(error) => {
            tracing::error!("could not answer chat message: {error}");
            return error.into_alert_response();
        }
    };
    let messages = exchange(&question, &answer, asked_at, now());

    if is_htmx {
        messages.into_response()
    } else {
        chat_view(&question.user_id, messages).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use axum_htmx::HxRequest;
    use scraper::Selector;
    use time::macros::time;

    use crate::{
        Error, endpoints,
        question::{Question, QuestionState},
        test_utils::{
            CannedAnswerer, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_valid_html, must_get_form, parse_html_document,
            parse_html_fragment,
        },
    };

    use super::{ChatForm, Sender, chat_endpoint, format_time, get_chat_page, message_bubble};

    fn form(user_id: &str, message: &str) -> Form<ChatForm> {
        Form(ChatForm {
            user_id: user_id.to_owned(),
            message: message.to_owned(),
        })
    }

    fn state(answerer: Arc<CannedAnswerer>) -> State<QuestionState> {
        State(QuestionState {
            question_answerer: answerer,
        })
    }

    #[tokio::test]
    async fn page_renders_transcript_and_form() {
        let response = get_chat_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::CHAT_API, "hx-post");
        assert_hx_endpoint(&form, "#chat-transcript", "hx-target");
        assert_form_input(&form, "user_id", "text");
        assert_form_submit_button_with_text(&form, "Send");

        let transcript = Selector::parse("#chat-transcript").unwrap();
        assert!(html.select(&transcript).next().is_some());
    }

    #[tokio::test]
    async fn htmx_request_gets_user_then_assistant_message() {
        let answerer = Arc::new(CannedAnswerer::new("Cut back on takeaways."));

        let response =
            chat_endpoint(state(answerer.clone()), HxRequest(true), form("3", "How?")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let senders: Vec<&str> = html
            .select(&Selector::parse("[data-sender]").unwrap())
            .filter_map(|bubble| bubble.value().attr("data-sender"))
            .collect();
        assert_eq!(senders, vec!["You", "Finsight"]);
        assert!(html.html().contains("How?"));
        assert!(html.html().contains("Cut back on takeaways."));
        assert_eq!(
            answerer.asked(),
            vec![Question {
                user_id: "3".to_owned(),
                text: "How?".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn plain_form_post_gets_full_page() {
        let answerer = Arc::new(CannedAnswerer::new("Save more."));

        let response = chat_endpoint(state(answerer), HxRequest(false), form("3", "Hi")).await;

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let transcript = Selector::parse("#chat-transcript [data-sender]").unwrap();
        assert_eq!(html.select(&transcript).count(), 2);
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let answerer = Arc::new(CannedAnswerer::new("unused"));

        let response = chat_endpoint(state(answerer.clone()), HxRequest(true), form("3", "")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(answerer.asked().is_empty());
    }

    #[tokio::test]
    async fn answer_failure_shows_error_alert() {
        let answerer = Arc::new(CannedAnswerer::failing(Error::BackendTimeout));

        let response = chat_endpoint(state(answerer), HxRequest(true), form("3", "Hi")).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = parse_html_fragment(response).await;
        assert!(html.html().contains("Something went wrong"));
    }

    #[test]
    fn bubble_shows_sender_and_time() {
        let markup = message_bubble(Sender::User, "Hello", time!(09:05)).into_string();

        assert!(markup.contains("You · 09:05"));
        assert_eq!(format_time(time!(17:30)), "17:30");
    }
}
