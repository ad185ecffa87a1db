//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    home::get_home_page,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    question::{ask_question_endpoint, chat_endpoint, get_ask_question_page, get_chat_page},
    transaction::{get_update_transaction_page, record_transaction_endpoint},
    visualize::{get_visualize_page, visualize_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let pages = Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(endpoints::ASK_QUESTION_VIEW, get(get_ask_question_page))
        .route(endpoints::CHAT_VIEW, get(get_chat_page))
        .route(endpoints::VISUALIZE_VIEW, get(get_visualize_page))
        .route(
            endpoints::UPDATE_TRANSACTION_VIEW,
            get(get_update_transaction_page),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api = Router::new()
        .route(endpoints::QUESTIONS_API, post(ask_question_endpoint))
        .route(endpoints::CHAT_API, post(chat_endpoint))
        .route(endpoints::VISUALIZE_API, post(visualize_endpoint))
        .route(
            endpoints::TRANSACTIONS_API,
            post(record_transaction_endpoint),
        );

    pages
        .merge(api)
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;

    use crate::{AppState, backend::DemoBackend, endpoints};

    use super::build_router;

    const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");

    fn server() -> TestServer {
        let app = build_router(AppState::new(DemoBackend::new(Duration::ZERO)));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn pages_are_served() {
        let server = server();

        for page in [
            endpoints::ROOT,
            endpoints::ASK_QUESTION_VIEW,
            endpoints::CHAT_VIEW,
            endpoints::VISUALIZE_VIEW,
            endpoints::UPDATE_TRANSACTION_VIEW,
        ] {
            let response = server.get(page).await;

            assert_eq!(response.status_code(), StatusCode::OK, "GET {page}");
            assert!(response.text().contains("<!DOCTYPE html>"), "GET {page}");
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = server().get("/no/such/page").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("404"));
    }

    #[tokio::test]
    async fn error_page_is_served() {
        let response = server().get(endpoints::INTERNAL_ERROR_VIEW).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn visualize_charts_demo_transactions() {
        let response = server()
            .post(endpoints::VISUALIZE_API)
            .add_header(HX_REQUEST, HeaderValue::from_static("true"))
            .form(&[("user_id", "1")])
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("radar-chart"));
        assert!(text.contains("Entertainment"));
        assert!(text.contains("$200.00"));
    }

    #[tokio::test]
    async fn question_gets_demo_answer() {
        let response = server()
            .post(endpoints::QUESTIONS_API)
            .add_header(HX_REQUEST, HeaderValue::from_static("true"))
            .form(&[("user_id", "5"), ("question", "Can I afford a bike?")])
            .await;

        response.assert_status_ok();
        assert!(
            response
                .text()
                .contains("Here's a response for user 5: Can I afford a bike?")
        );
    }

    #[tokio::test]
    async fn transaction_form_is_recorded() {
        let response = server()
            .post(endpoints::TRANSACTIONS_API)
            .add_header(HX_REQUEST, HeaderValue::from_static("true"))
            .form(&[
                ("user_id", "5"),
                ("amount", "12.5"),
                ("transaction_type", "expense"),
                ("category", "Food"),
                ("description", ""),
            ])
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Transaction saved"));
    }
}
