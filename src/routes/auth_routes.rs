use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::controllers::auth_controllers::{me, sign_in, sign_out, sign_up};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me::me))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth));

    Router::new()
        .route("/signup", post(sign_up::sign_up))
        .route("/signin", post(sign_in::sign_in))
        .route("/signout", post(sign_out::sign_out))
        .merge(protected)
}
