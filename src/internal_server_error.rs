//! The page shown when the server cannot complete a request.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;

use crate::html::error_view;

/// Tells the user that something failed on the server and what they can do about it.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalServerError {
    /// What went wrong.
    pub description: String,
    /// How the user can recover.
    pub fix: String,
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self {
            description: "Sorry, the amount due could not be loaded or saved.".to_owned(),
            fix: "Your last change may not have been saved. Go back to the balance and check \
                the amount due before trying again."
                .to_owned(),
        }
    }
}

impl InternalServerError {
    fn view(&self) -> Markup {
        error_view("Server Error", "500", &self.description, &self.fix)
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.view()).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use scraper::Selector;

    use crate::{
        endpoints,
        test_utils::{assert_content_type, assert_valid_html, parse_html_document},
    };

    use super::get_internal_server_error_page;

    #[tokio::test]
    async fn links_back_to_balance() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let link = html
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("could not find link");
        assert_eq!(link.value().attr("href"), Some(endpoints::ROOT));
        assert!(link.text().collect::<String>().contains("balance"));
    }
}
