use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::state::AppState;
use crate::utils::{
    error::{AppError, AppResult},
    session::{self, SESSION_COOKIE},
};

pub async fn sign_out(State(state): State<AppState>, cookie_jar: CookieJar) -> AppResult<Response> {
    if let Some(cookie) = cookie_jar.get(SESSION_COOKIE) {
        if let Ok(claims) = session::verify_token(&state.config.session_secret, cookie.value()) {
            info!(user = %claims.sub, "User signed out");
        }
    }

    let mut resp = Json(serde_json::json!({
        "success": true,
        "message": "Signed out"
    }))
    .into_response();

    resp.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(&session::cleared_cookie(state.config.cookie_secure))
            .map_err(|e| AppError::InternalError(format!("Failed to create cookie header: {e}")))?,
    );

    Ok(resp)
}
