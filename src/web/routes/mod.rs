//! Contains all the routes that this application can handle.

mod signup;

pub use signup::SUBSCRIBED_MESSAGE;

use axum::{
    routing::{post, MethodRouter},
    Router,
};

use crate::AppState;
use signup::{method_not_allowed, preflight, subscribe};

/// All the routes of the server.
/// The signup handler answers on every path, only the method matters.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", signup_routes())
        .route("/{*path}", signup_routes())
        .with_state(app_state)
}

/// SIGNUP - `POST` subscribes, `OPTIONS` answers the preflight, everything else is a 405.
fn signup_routes() -> MethodRouter<AppState> {
    post(subscribe)
        .options(preflight)
        .fallback(method_not_allowed)
}
