use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::poll_controllers::{cast_vote, create_poll, get_poll, get_polls};
use crate::state::AppState;

pub fn poll_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_polls::get_polls).post(create_poll::create_poll))
        .route("/:pollId", get(get_poll::get_poll))
        .route("/:pollId/vote", post(cast_vote::cast_vote))
}
