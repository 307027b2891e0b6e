//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxReswap, SwapOption};

use crate::{
    alert::Alert,
    amount::{MAX_DIGITS_AFTER_DOT, MAX_DIGITS_BEFORE_DOT},
    internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The text entered for an amount is not a valid decimal number.
    ///
    /// Callers should pass in the text that could not be parsed.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount has more digits before the decimal point than allowed.
    #[error("\"{0}\" has more than 7 digits before the decimal point")]
    AmountTooLarge(String),

    /// The amount has more digits after the decimal point than allowed.
    #[error("\"{0}\" has more than 2 digits after the decimal point")]
    TooManyDecimalPlaces(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the lock on the database or the balance.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// The response tells HTMX not to swap the request's target, so only the
    /// out-of-band alert changes on the page.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidAmount(text) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!(
                        "\"{text}\" is not a number. Enter an amount such as 12.50."
                    ),
                },
            ),
            Error::AmountTooLarge(text) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Amount too large".to_owned(),
                    details: format!(
                        "\"{text}\" has too many digits. Enter at most \
                        {MAX_DIGITS_BEFORE_DOT} digits before the decimal point."
                    ),
                },
            ),
            Error::TooManyDecimalPlaces(text) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Too many decimal places".to_owned(),
                    details: format!(
                        "\"{text}\" has too many decimal places. Enter at most \
                        {MAX_DIGITS_AFTER_DOT} digits after the decimal point."
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, HxReswap(SwapOption::None), alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{HeaderValue, StatusCode},
        response::IntoResponse,
    };
    use axum_htmx::HX_RESWAP;

    use super::Error;

    #[test]
    fn no_rows_maps_to_not_found() {
        let error = Error::from(rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn input_errors_are_unprocessable() {
        for error in [
            Error::InvalidAmount("abc".to_owned()),
            Error::AmountTooLarge("12345678".to_owned()),
            Error::TooManyDecimalPlaces("1.234".to_owned()),
        ] {
            let response = error.into_alert_response();

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn alert_response_does_not_swap_target() {
        for error in [
            Error::InvalidAmount("abc".to_owned()),
            Error::DatabaseLockError,
        ] {
            let response = error.into_alert_response();

            assert_eq!(
                response.headers().get(HX_RESWAP),
                Some(&HeaderValue::from_static("none"))
            );
        }
    }

    #[test]
    fn lock_error_is_internal_server_error() {
        let response = Error::DatabaseLockError.into_alert_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = Error::DatabaseLockError.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_renders_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
