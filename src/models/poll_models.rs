use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::db::store::Record;
use crate::pagination::{Boundary, Paginated};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub question: String,
    pub created_at: DateTime,
    #[serde(default)]
    pub is_multiple_choice: bool,
    pub options: Vec<PollOption>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PollOption {
    pub id: String,
    pub text: String,
    pub votes: u32,
}

impl Poll {
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|option| option.id == option_id)
    }
}

impl Record for Poll {
    const COLLECTION: &'static str = "polls";
}

impl Paginated for Poll {
    const TIMESTAMP_FIELD: &'static str = "created_at";

    fn boundary(&self) -> Boundary {
        Boundary::new(self.created_at, self.id)
    }
}
