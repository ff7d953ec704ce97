pub mod me;
pub mod models;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

use axum::{
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::controllers::auth_controllers::models::AuthResponse;
use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::{
    error::{AppError, AppResult},
    session,
};

/// Issues a session for `user` and answers with the session cookie set.
pub(crate) fn signed_in_response(state: &AppState, user: &User) -> AppResult<Response> {
    let config = &state.config;
    let user_id = user.id.to_hex();

    let token = session::create_token(
        &config.session_secret,
        config.session_ttl_hours,
        &user_id,
        &user.email,
    )?;
    let cookie_value = session::session_cookie(&token, config.session_ttl_hours, config.cookie_secure);

    let mut resp = Json(AuthResponse {
        success: true,
        user_id,
        email: user.email.clone(),
    })
    .into_response();

    resp.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(&cookie_value)
            .map_err(|e| AppError::InternalError(format!("Failed to create cookie header: {e}")))?,
    );

    Ok(resp)
}
