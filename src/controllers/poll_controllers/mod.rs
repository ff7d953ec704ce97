pub mod cast_vote;
pub mod create_poll;
pub mod get_poll;
pub mod get_polls;
pub mod models;
