//! Defines the page and route handler for requests to routes that do not exist.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        let body = error_view(
            "Not Found",
            "404",
            "Something's missing.",
            "Sorry, there is no page here. The amount due is on the balance page.",
        );

        (StatusCode::NOT_FOUND, Html(body.into_string())).into_response()
    }
}

pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
