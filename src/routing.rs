//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    balance::{
        add_amount_endpoint, get_balance_page, remove_all_amount_endpoint, remove_amount_endpoint,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_balance_page))
        .route(endpoints::ADD_AMOUNT, post(add_amount_endpoint))
        .route(endpoints::REMOVE_AMOUNT, post(remove_amount_endpoint))
        .route(endpoints::REMOVE_ALL_AMOUNT, post(remove_all_amount_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        AppState,
        balance::BalancePolicy,
        endpoints, initialize_db,
        preferences::{EphemeralStore, SqlitePreferences},
    };

    use super::build_router;

    #[derive(serde::Serialize)]
    struct AmountForm<'a> {
        amount: &'a str,
    }

    fn must_create_test_connection() -> Arc<Mutex<Connection>> {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize_db(&connection).expect("could not initialize test DB");

        Arc::new(Mutex::new(connection))
    }

    fn new_server(connection: &Arc<Mutex<Connection>>, policy: BalancePolicy) -> TestServer {
        let state = AppState::new(SqlitePreferences::new(connection.clone()), policy)
            .expect("could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn amount_due_text(page: &str) -> String {
        Html::parse_document(page)
            .select(&Selector::parse("#amount-due").unwrap())
            .next()
            .expect("could not find #amount-due")
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[tokio::test]
    async fn amount_survives_restart() {
        let connection = must_create_test_connection();
        let server = new_server(&connection, BalancePolicy::Clamped);

        server
            .post(endpoints::ADD_AMOUNT)
            .form(&AmountForm { amount: "50" })
            .await
            .assert_status_ok();
        server
            .post(endpoints::REMOVE_AMOUNT)
            .form(&AmountForm { amount: "7.5" })
            .await
            .assert_status_ok();
        drop(server);

        let restarted = new_server(&connection, BalancePolicy::Clamped);
        let page = restarted.get(endpoints::ROOT).await;

        page.assert_status_ok();
        assert_eq!(amount_due_text(&page.text()), "$42.50");
    }

    #[tokio::test]
    async fn ephemeral_store_forgets_amount_on_restart() {
        let state = AppState::new(EphemeralStore, BalancePolicy::Unbounded).unwrap();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        server
            .post(endpoints::ADD_AMOUNT)
            .form(&AmountForm { amount: "50" })
            .await
            .assert_status_ok();
        drop(server);

        let state = AppState::new(EphemeralStore, BalancePolicy::Unbounded).unwrap();
        let restarted = TestServer::try_new(build_router(state)).expect("Could not create test server.");
        let page = restarted.get(endpoints::ROOT).await;

        assert_eq!(amount_due_text(&page.text()), "$0.00");
    }

    #[tokio::test]
    async fn invalid_amount_is_not_saved() {
        let connection = must_create_test_connection();
        let server = new_server(&connection, BalancePolicy::Clamped);

        server
            .post(endpoints::ADD_AMOUNT)
            .form(&AmountForm { amount: "abc" })
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let page = server.get(endpoints::ROOT).await;
        assert_eq!(amount_due_text(&page.text()), "$0.00");
    }

    #[tokio::test]
    async fn serves_stylesheet() {
        let connection = must_create_test_connection();
        let server = new_server(&connection, BalancePolicy::Clamped);

        let response = server.get("/static/main.css").await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "text/css");
        assert!(response.text().contains("#alert-container"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let connection = must_create_test_connection();
        let server = new_server(&connection, BalancePolicy::Clamped);

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_page_is_internal_server_error() {
        let connection = must_create_test_connection();
        let server = new_server(&connection, BalancePolicy::Clamped);

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
