use axum::{
    extract::{Query, State},
    Json,
};

use crate::controllers::paging::{open_cursor, PageMeta};
use crate::controllers::poll_controllers::models::{PollListQuery, PollPageResponse, PollSummary};
use crate::models::poll_models::Poll;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_polls(
    State(state): State<AppState>,
    Query(query): Query<PollListQuery>,
) -> AppResult<Json<PollPageResponse>> {
    let cursor = open_cursor::<Poll>(
        &state.store,
        query.page,
        query.after.as_deref(),
        query.before.as_deref(),
    )
    .await?;

    Ok(Json(PollPageResponse {
        items: cursor.items().iter().map(PollSummary::from).collect(),
        meta: PageMeta::of(&cursor),
    }))
}
