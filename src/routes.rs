//! # Routing
//!
//! Maps method + path to handlers. Each path gets a method fallback so that a
//! verb with no handler answers 405 "Method not allowed". Paths that match
//! nothing fall through to axum's default 404.
//!
//! Every path under `/users/` belongs to the item routes, whatever follows the
//! prefix. The wildcard does not match an empty remainder, so `/users/` is
//! registered on its own with the same method router.

use crate::handlers::register::register;
use crate::handlers::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::handlers::method_not_allowed;
use crate::state::AppState;
use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

fn user_item_routes() -> MethodRouter<AppState> {
    get(get_user)
        .put(update_user)
        .delete(delete_user)
        .fallback(method_not_allowed)
}

/// Build the application router with its shared state attached
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/users",
            get(list_users)
                .post(create_user)
                .fallback(method_not_allowed),
        )
        .route("/users/", user_item_routes())
        .route("/users/*id", user_item_routes())
        .route("/register", post(register).fallback(method_not_allowed))
        // HTTP request/response logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
