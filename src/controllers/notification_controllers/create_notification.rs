use axum::{extract::State, http::StatusCode, Json};
use mongodb::bson::{oid::ObjectId, DateTime};
use tracing::info;

use crate::controllers::notification_controllers::models::{
    CreateNotificationRequest, NotificationResponse,
};
use crate::models::notification_models::Notification;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn create_notification(
    State(state): State<AppState>,
    Json(payload): Json<CreateNotificationRequest>,
) -> AppResult<(StatusCode, Json<NotificationResponse>)> {
    let title = payload.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::ValidationError("Title is required".to_string()));
    }

    let attachments: Vec<String> = payload
        .attachments
        .iter()
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .collect();

    if let Some(bad) = attachments
        .iter()
        .find(|link| !(link.starts_with("http://") || link.starts_with("https://")))
    {
        return Err(AppError::ValidationError(format!(
            "Attachment '{bad}' must be an http(s) link"
        )));
    }

    let notification = Notification {
        id: ObjectId::new(),
        title,
        content: payload.content.trim().to_string(),
        category: payload.category.trim().to_string(),
        date: DateTime::now(),
        attachments,
    };

    state.store.insert(&notification).await?;

    info!(id = %notification.id, category = %notification.category, "Notification created");

    Ok((StatusCode::CREATED, Json(notification.into())))
}
