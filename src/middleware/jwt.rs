use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::state::AppState;
use crate::utils::{
    error::AppError,
    session::{verify_token, SESSION_COOKIE},
};

pub async fn jwt_auth(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = cookie_jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("Not signed in".to_string()))?;

    let claims = verify_token(&state.config.session_secret, &token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
