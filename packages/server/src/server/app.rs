//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::common::ActorId;
use crate::domains::counting::CountingGame;
use crate::server::middleware::admin_auth_middleware;
use crate::server::routes::{
    bind_channel_handler, chat_event_handler, health_handler, status_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub game: Arc<CountingGame>,
    /// Events authored by this user are never counted
    pub bot_user_id: Option<ActorId>,
}

/// Build the Axum application router
///
/// `admin_token` guards the `/setup` routes; `None` leaves them open.
pub fn build_app(state: AppState, admin_token: Option<String>) -> Router {
    let admin_token: Option<Arc<str>> = admin_token.map(Arc::from);

    let setup = Router::new()
        .route("/channel", post(bind_channel_handler))
        .route_layer(middleware::from_fn(move |req, next| {
            admin_auth_middleware(admin_token.clone(), req, next)
        }));

    Router::new()
        .route("/events", post(chat_event_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .nest("/setup", setup)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
