//! Finsight is a small web frontend for a personal-finance service.
//!
//! It serves HTML pages for asking financial questions, recording
//! transactions and visualizing spending per category. The finance service
//! itself lives elsewhere; this crate talks to it through the capabilities in
//! [backend] or answers from canned demo data.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
pub mod backend;
mod endpoints;
mod home;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod question;
mod routing;
mod transaction;
mod visualize;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::logging_middleware;
pub use question::{Question, QuestionAnswerer};
pub use routing::build_router;
pub use transaction::{
    NewTransaction, Transaction, TransactionRecorder, TransactionSource, TransactionType,
};
pub use visualize::{CategoryTotal, ChartData, Dataset, VisualizationState, aggregate};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The finance service could not be reached, e.g. the connection was
    /// refused or dropped.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not reach the finance service: {0}")]
    BackendUnavailable(String),

    /// The finance service did not respond within the configured timeout.
    #[error("the request to the finance service timed out")]
    BackendTimeout,

    /// The finance service responded with a non-success status code.
    #[error("the finance service responded with status {0}")]
    BackendStatus(u16),

    /// The finance service reported an error in its response body.
    #[error("the finance service reported an error: {0}")]
    BackendError(String),

    /// The response body from the finance service could not be decoded.
    ///
    /// This includes transactions whose amount is not a number.
    #[error("could not decode the finance service response: {0}")]
    InvalidResponse(String),

    /// A transaction amount was not a finite number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A required form field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Error::BackendTimeout
        } else if error.is_decode() {
            Error::InvalidResponse(error.to_string())
        } else if let Some(status) = error.status() {
            Error::BackendStatus(status.as_u16())
        } else {
            Error::BackendUnavailable(error.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::BackendUnavailable(_) | Error::BackendTimeout | Error::BackendStatus(_) => {
                tracing::error!("Finance service request failed: {self}");
                InternalServerError {
                    description: "Finance Service Unavailable",
                    fix: "Could not reach the finance service. Try again later.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for HTMX requests.
    fn into_alert_response(self) -> Response {
        match self {
            Error::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Missing information",
                    &format!("{field} is required. Fill it in and try again."),
                )
                .into_html(),
            )
                .into_response(),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("\"{amount}\" is not a number. Enter an amount such as 12.50."),
                )
                .into_html(),
            )
                .into_response(),
            error => {
                tracing::error!("Could not complete request: {error}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::error(
                        "Something went wrong",
                        "An error occurred. Please try again.",
                    )
                    .into_html(),
                )
                    .into_response()
            }
        }
    }
}
