use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::oid::ObjectId;

use crate::controllers::notification_controllers::models::NotificationResponse;
use crate::models::notification_models::Notification;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn get_notification(
    Path(notification_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<NotificationResponse>> {
    let obj_id = ObjectId::parse_str(&notification_id)
        .map_err(|_| AppError::BadRequest("Invalid notification id".to_string()))?;

    let notification = state
        .store
        .find_by_id::<Notification>(obj_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    Ok(Json(notification.into()))
}
