pub mod notification_models;
pub mod poll_models;
pub mod user_models;

use chrono::{DateTime, Utc};
use mongodb::bson;

pub fn to_utc(at: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis()).unwrap_or_default()
}
