use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::controllers::poll_controllers::get_poll::parse_poll_id;
use crate::controllers::poll_controllers::models::{CastVoteRequest, PollResponse};
use crate::models::poll_models::Poll;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<CastVoteRequest>,
) -> AppResult<Json<PollResponse>> {
    let poll_obj_id = parse_poll_id(&poll_id)?;

    let poll = state
        .store
        .find_by_id::<Poll>(poll_obj_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let selected = payload.selected();
    validate_selection(&poll, &selected)?;

    if !state.store.record_votes(poll_obj_id, &selected).await? {
        return Err(AppError::NotFound("Poll not found".to_string()));
    }

    info!(poll = %poll_obj_id, options = ?selected, "Vote recorded");

    let new_poll = state
        .store
        .find_by_id::<Poll>(poll_obj_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    Ok(Json(new_poll.into()))
}

fn validate_selection(poll: &Poll, selected: &[String]) -> AppResult<()> {
    if selected.is_empty() {
        return Err(AppError::ValidationError("Choose an option to vote for".to_string()));
    }

    if selected.len() > 1 && !poll.is_multiple_choice {
        return Err(AppError::ValidationError(
            "This poll accepts a single option".to_string(),
        ));
    }

    if let Some(unknown) = selected.iter().find(|id| !poll.has_option(id)) {
        return Err(AppError::BadRequest(format!(
            "Invalid option id '{unknown}' for this poll"
        )));
    }

    let mut seen: Vec<&String> = Vec::with_capacity(selected.len());
    for id in selected {
        if seen.contains(&id) {
            return Err(AppError::ValidationError(format!("Option '{id}' selected twice")));
        }
        seen.push(id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::poll_models::PollOption;
    use mongodb::bson::{oid::ObjectId, DateTime};

    fn poll(multiple: bool) -> Poll {
        Poll {
            id: ObjectId::new(),
            question: "Pick a color".to_string(),
            created_at: DateTime::now(),
            is_multiple_choice: multiple,
            options: vec![
                PollOption { id: "1".into(), text: "Red".into(), votes: 0 },
                PollOption { id: "2".into(), text: "Blue".into(), votes: 0 },
            ],
        }
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_choice_polls_take_one_option() {
        assert!(validate_selection(&poll(false), &ids(&["2"])).is_ok());
        assert!(matches!(
            validate_selection(&poll(false), &ids(&["1", "2"])),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn multiple_choice_polls_take_distinct_options() {
        assert!(validate_selection(&poll(true), &ids(&["1", "2"])).is_ok());
        assert!(validate_selection(&poll(true), &ids(&["1", "1"])).is_err());
    }

    #[test]
    fn unknown_and_empty_selections_are_rejected() {
        assert!(matches!(
            validate_selection(&poll(false), &ids(&["7"])),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_selection(&poll(false), &[]).is_err());
    }
}
