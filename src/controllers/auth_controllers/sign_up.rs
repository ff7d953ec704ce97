use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use mongodb::bson::{oid::ObjectId, DateTime};
use tracing::info;

use crate::controllers::auth_controllers::{models::CredentialsRequest, signed_in_response};
use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::{
    error::{AppError, AppResult},
    password::hash_password,
};

const MIN_PASSWORD_LEN: usize = 6;

pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    let email = body.normalized_email();

    if !is_plausible_email(&email) {
        return Err(AppError::ValidationError("A valid email is required".to_string()));
    }

    if body.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::ValidationError(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let existing = state.store.find_by_field::<User>("email", &email).await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let user = User {
        id: ObjectId::new(),
        password_hash: hash_password(&body.password)?,
        email,
        created_at: DateTime::now(),
    };

    // A concurrent sign-up can still win the race to the unique index.
    state.store.insert(&user).await.map_err(|e| match e {
        AppError::Conflict(_) => AppError::Conflict("Email already registered".to_string()),
        other => other,
    })?;

    info!(user = %user.id, "User signed up");

    let resp = signed_in_response(&state, &user)?;
    Ok((StatusCode::CREATED, resp))
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace),
        None => false,
    }
}
