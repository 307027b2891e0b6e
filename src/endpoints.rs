//! The API endpoints URIs.

/// The root route which displays the amount due.
pub const ROOT: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for adding to the amount due.
pub const ADD_AMOUNT: &str = "/api/amount/add";
/// The route for removing from the amount due.
pub const REMOVE_AMOUNT: &str = "/api/amount/remove";
/// The route for removing the entire amount due.
pub const REMOVE_ALL_AMOUNT: &str = "/api/amount/remove_all";
