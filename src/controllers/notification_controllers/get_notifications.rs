use axum::{
    extract::{Query, State},
    Json,
};

use crate::controllers::notification_controllers::models::{
    NotificationListQuery, NotificationPageResponse, NotificationSummary,
};
use crate::controllers::paging::{open_cursor, PageMeta};
use crate::models::notification_models::Notification;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::filter::{categories, NotificationFilter};

pub async fn get_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> AppResult<Json<NotificationPageResponse>> {
    let cursor = open_cursor::<Notification>(
        &state.store,
        query.page,
        query.after.as_deref(),
        query.before.as_deref(),
    )
    .await?;

    let filter = NotificationFilter::new(query.search.as_deref(), query.category.as_deref());

    Ok(Json(NotificationPageResponse {
        items: filter
            .apply(cursor.items())
            .into_iter()
            .map(NotificationSummary::from)
            .collect(),
        categories: categories(cursor.items()),
        meta: PageMeta::of(&cursor),
    }))
}
