pub mod auth_routes;
pub mod notification_routes;
pub mod poll_routes;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::controllers::home;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::root))
        .nest("/notifications", notification_routes::notification_routes())
        .nest("/voting", poll_routes::poll_routes())
        .nest("/auth", auth_routes::auth_routes(state.clone()))
        .layer(cors_layer(state.config.cors_origin.as_deref()))
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::new();
    };

    let origin = match origin.parse::<HeaderValue>() {
        Ok(origin) => origin,
        Err(_) => {
            warn!("Failed to parse CORS origin {origin}, cross-origin requests disabled");
            return CorsLayer::new();
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::COOKIE])
        .allow_credentials(true)
}
