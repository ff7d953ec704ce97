use axum::{extract::State, response::Response, Json};
use tracing::info;

use crate::controllers::auth_controllers::{models::CredentialsRequest, signed_in_response};
use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::{
    error::{AppError, AppResult},
    password::verify_password,
};

pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<Response> {
    let email = body.normalized_email();
    let invalid = || AppError::AuthenticationError("Invalid email or password".to_string());

    let user = state
        .store
        .find_by_field::<User>("email", &email)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&body.password, &user.password_hash) {
        return Err(invalid());
    }

    info!(user = %user.id, "User signed in");

    signed_in_response(&state, &user)
}
