//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that HTMX swaps into the page's
//! `#alert-container`.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert message with its styling variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    /// Create a new success alert
    pub fn success(message: &str, details: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html!(
            div
                role="alert"
                class=(container_style)
                onclick="this.remove()"
            {
                p class="font-semibold" { (message) }

                @if !details.is_empty() {
                    p class="text-sm" { (details) }
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

const SUCCESS_STYLE: &str = "p-4 mb-4 rounded-lg cursor-pointer text-green-800 \
    bg-green-50 dark:bg-gray-800 dark:text-green-400";

const ERROR_STYLE: &str = "p-4 mb-4 rounded-lg cursor-pointer text-red-800 \
    bg-red-50 dark:bg-gray-800 dark:text-red-400";
