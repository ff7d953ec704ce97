use axum::{extract::State, http::StatusCode, Json};
use mongodb::bson::{oid::ObjectId, DateTime};
use tracing::info;

use crate::controllers::poll_controllers::models::{CreatePollRequest, PollResponse};
use crate::models::poll_models::{Poll, PollOption};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn create_poll(
    State(state): State<AppState>,
    Json(payload): Json<CreatePollRequest>,
) -> AppResult<(StatusCode, Json<PollResponse>)> {
    let question = payload.question.trim().to_string();
    if question.is_empty() {
        return Err(AppError::ValidationError("Question is required".to_string()));
    }

    let options: Vec<String> = payload
        .options
        .iter()
        .map(|opt| opt.trim().to_string())
        .collect();

    if options.iter().any(String::is_empty) {
        return Err(AppError::ValidationError("Every option needs a text".to_string()));
    }

    if options.len() < 2 {
        return Err(AppError::ValidationError(
            "Enter at least 2 options to choose from".to_string(),
        ));
    }

    let mut deduped_options: Vec<&String> = Vec::new();
    for option in &options {
        if !deduped_options.contains(&option) {
            deduped_options.push(option);
        }
    }

    if deduped_options.len() != options.len() {
        return Err(AppError::ValidationError("Poll options must be unique".to_string()));
    }

    let new_poll = Poll {
        id: ObjectId::new(),
        question,
        created_at: DateTime::now(),
        is_multiple_choice: payload.is_multiple_choice,
        options: options
            .into_iter()
            .enumerate()
            .map(|(index, text)| PollOption {
                id: (index + 1).to_string(),
                text,
                votes: 0,
            })
            .collect(),
    };

    state.store.insert(&new_poll).await?;

    info!(id = %new_poll.id, options = new_poll.options.len(), "Poll created");

    Ok((StatusCode::CREATED, Json(new_poll.into())))
}
