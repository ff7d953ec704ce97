use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controllers::paging::PageMeta;
use crate::models::{poll_models::Poll, to_utc};
use crate::utils::tally::{tally, total_votes, OptionTally};

#[derive(Deserialize, Debug)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub is_multiple_choice: bool,
}

#[derive(Deserialize, Debug, Default)]
pub struct PollListQuery {
    pub page: Option<u32>,
    pub after: Option<String>,
    pub before: Option<String>,
}

/// Either a single `option_id` or, for multiple-choice polls, `option_ids`.
#[derive(Deserialize, Debug, Default)]
pub struct CastVoteRequest {
    pub option_id: Option<String>,
    #[serde(default)]
    pub option_ids: Vec<String>,
}

impl CastVoteRequest {
    pub fn selected(self) -> Vec<String> {
        self.option_id
            .into_iter()
            .chain(self.option_ids)
            .map(|id| id.trim().to_string())
            .collect()
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct PollResponse {
    pub id: String,
    pub question: String,
    pub created_at: DateTime<Utc>,
    pub is_multiple_choice: bool,
    pub options: Vec<OptionTally>,
    pub total_votes: u64,
}

impl From<Poll> for PollResponse {
    fn from(poll: Poll) -> Self {
        Self {
            id: poll.id.to_hex(),
            total_votes: total_votes(&poll.options),
            options: tally(&poll.options),
            question: poll.question,
            created_at: to_utc(poll.created_at),
            is_multiple_choice: poll.is_multiple_choice,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct PollSummary {
    pub id: String,
    pub question: String,
    pub option_count: usize,
    pub is_multiple_choice: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Poll> for PollSummary {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id.to_hex(),
            question: poll.question.clone(),
            option_count: poll.options.len(),
            is_multiple_choice: poll.is_multiple_choice,
            created_at: to_utc(poll.created_at),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct PollPageResponse {
    pub items: Vec<PollSummary>,
    #[serde(flatten)]
    pub meta: PageMeta,
}
