use axum::{Extension, Json};

use crate::controllers::auth_controllers::models::CurrentUserResponse;
use crate::utils::session::Claims;

pub async fn me(Extension(claims): Extension<Claims>) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        id: claims.sub,
        email: claims.email,
    })
}
