use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::db::store::Record;
use crate::pagination::{Boundary, Paginated};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub date: DateTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl Record for Notification {
    const COLLECTION: &'static str = "notifications";
}

impl Paginated for Notification {
    const TIMESTAMP_FIELD: &'static str = "date";

    fn boundary(&self) -> Boundary {
        Boundary::new(self.date, self.id)
    }
}
