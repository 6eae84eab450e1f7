use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::config::{
    create_cors_layer, create_security_headers_layer, log_api_request, Config, ConfigError,
};
use crate::handlers::crafts::{create_craft, get_craft, list_crafts};
use crate::handlers::events::{create_event, list_events};
use crate::handlers::team::{create_team_member, list_team_members};
use crate::handlers::volunteers::{create_volunteer, list_volunteers};
use crate::handlers::{api_not_found, AppState};
use crate::utils::error::AppError;

pub mod client;

/// JSON API mounted under `/api`.
pub fn api_routes(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/volunteers", post(create_volunteer).get(list_volunteers))
        .route("/crafts", post(create_craft).get(list_crafts))
        .route("/crafts/:id", get(get_craft))
        .route("/team", post(create_team_member).get(list_team_members))
        .route("/events", post(create_event).get(list_events))
        .fallback(api_not_found)
        .with_state(state)
        .layer(create_security_headers_layer(config.environment.is_production()))
        .layer(create_cors_layer(config.cors_allowed_origins.as_deref()))
}

/// The full application: API, client assets, request logging and panic
/// recovery.
pub fn create_routes(state: AppState, config: &Config) -> Result<Router, ConfigError> {
    let mut app = Router::new().nest("/api", api_routes(state, config));

    if let Some(dir) = config.client_dir_checked()? {
        tracing::info!("Serving client application from {}", dir.display());
        app = app.fallback_service(client::serve_client(&dir));
    }

    Ok(app
        .layer(middleware::from_fn(log_api_request))
        .layer(CatchPanicLayer::custom(handle_panic)))
}

/// A panicking handler gets a generic 500; the server keeps running.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(detail).into_response()
}
