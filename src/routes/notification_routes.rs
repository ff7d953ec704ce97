use axum::{routing::get, Router};

use crate::controllers::notification_controllers::{
    create_notification, get_notification, get_notifications,
};
use crate::state::AppState;

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_notifications::get_notifications).post(create_notification::create_notification),
        )
        .route("/:notificationId", get(get_notification::get_notification))
}
