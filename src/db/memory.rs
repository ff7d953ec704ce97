use std::{cmp::Reverse, collections::HashMap, sync::Arc};

use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use crate::db::store::Record;
use crate::models::poll_models::Poll;
use crate::pagination::{PageAnchor, PageRequest, Paginated};
use crate::utils::error::{AppError, AppResult};

type Key = (i64, [u8; 12]);

/// Process-local document store with the same ordering rules as the Mongo
/// backend. Documents are kept as BSON so both backends share the serde path.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<&'static str, Vec<Document>>>>,
}

impl MemoryStore {
    pub async fn insert<T: Record>(&self, item: &T) -> AppResult<()> {
        let document = bson::to_document(item)?;
        let id = document.get_object_id("_id").ok();

        let mut collections = self.collections.write().await;
        let collection = collections.entry(T::COLLECTION).or_default();

        if id.is_some() && collection.iter().any(|d| d.get_object_id("_id").ok() == id) {
            return Err(AppError::Conflict(format!(
                "Duplicate _id in collection {}",
                T::COLLECTION
            )));
        }

        for field in T::UNIQUE_FIELDS {
            let value = document.get(field);
            if value.is_some() && collection.iter().any(|d| d.get(field) == value) {
                return Err(AppError::Conflict(format!(
                    "Duplicate {field} in collection {}",
                    T::COLLECTION
                )));
            }
        }

        collection.push(document);
        Ok(())
    }

    pub async fn find_one<T: Record>(
        &self,
        collection: &str,
        field: &str,
        value: &Bson,
    ) -> AppResult<Option<T>> {
        let collections = self.collections.read().await;

        let found = collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.get(field) == Some(value)));

        match found {
            Some(document) => Ok(Some(bson::from_document(document.clone())?)),
            None => Ok(None),
        }
    }

    pub async fn page<T: Paginated>(&self, request: &PageRequest) -> AppResult<Vec<T>> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(T::COLLECTION) else {
            return Ok(Vec::new());
        };

        let mut keyed: Vec<(Key, &Document)> = docs
            .iter()
            .filter_map(|d| sort_key(d, T::TIMESTAMP_FIELD).map(|key| (key, d)))
            .collect();

        match request.anchor {
            PageAnchor::Start => keyed.sort_by_key(|(key, _)| Reverse(*key)),
            PageAnchor::After(boundary) => {
                keyed.retain(|(key, _)| *key < boundary.key());
                keyed.sort_by_key(|(key, _)| Reverse(*key));
            }
            PageAnchor::Before(boundary) => {
                keyed.retain(|(key, _)| *key > boundary.key());
                keyed.sort_by_key(|(key, _)| *key);
                keyed.truncate(request.limit);
                keyed.reverse();
            }
        }

        keyed
            .into_iter()
            .take(request.limit)
            .map(|(_, d)| bson::from_document(d.clone()).map_err(AppError::from))
            .collect()
    }

    pub async fn record_votes(&self, poll_id: ObjectId, option_ids: &[String]) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(Poll::COLLECTION) else {
            return Ok(false);
        };
        let Some(slot) = docs
            .iter_mut()
            .find(|d| d.get_object_id("_id").ok() == Some(poll_id))
        else {
            return Ok(false);
        };

        let mut poll: Poll = bson::from_document(slot.clone())?;
        for option in poll.options.iter_mut() {
            if option_ids.contains(&option.id) {
                option.votes += 1;
            }
        }
        *slot = bson::to_document(&poll)?;

        Ok(true)
    }
}

fn sort_key(document: &Document, field: &str) -> Option<Key> {
    let at = document.get_datetime(field).ok()?;
    let id = document.get_object_id("_id").ok()?;
    Some((at.timestamp_millis(), id.bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{poll_models::PollOption, user_models::User};
    use crate::pagination::Boundary;
    use mongodb::bson::DateTime;

    fn poll(question: &str, millis: i64) -> Poll {
        Poll {
            id: ObjectId::new(),
            question: question.to_string(),
            created_at: DateTime::from_millis(millis),
            is_multiple_choice: false,
            options: vec![
                PollOption { id: "1".into(), text: "Yes".into(), votes: 0 },
                PollOption { id: "2".into(), text: "No".into(), votes: 0 },
            ],
        }
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let memory = MemoryStore::default();
        let p = poll("Lunch?", 1);
        memory.insert(&p).await.unwrap();
        assert!(matches!(memory.insert(&p).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn unique_fields_reject_a_second_record() {
        let memory = MemoryStore::default();
        let user = |email: &str| User {
            id: ObjectId::new(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            created_at: DateTime::now(),
        };

        memory.insert(&user("ada@dorm.test")).await.unwrap();
        assert!(matches!(
            memory.insert(&user("ada@dorm.test")).await,
            Err(AppError::Conflict(_))
        ));
        memory.insert(&user("bo@dorm.test")).await.unwrap();
    }

    #[tokio::test]
    async fn before_anchor_returns_the_nearest_records_newest_first() {
        let memory = MemoryStore::default();
        let polls: Vec<Poll> = (0..9).map(|i| poll(&format!("q{i}"), i * 10)).collect();
        for p in &polls {
            memory.insert(p).await.unwrap();
        }

        let request = PageRequest::new(PageAnchor::Before(polls[2].boundary()));
        let page: Vec<Poll> = memory.page(&request).await.unwrap();
        let questions: Vec<&str> = page.iter().map(|p| p.question.as_str()).collect();

        assert_eq!(questions, ["q7", "q6", "q5", "q4", "q3"]);
    }

    #[tokio::test]
    async fn votes_increment_only_selected_options() {
        let memory = MemoryStore::default();
        let p = poll("Movie night?", 5);
        memory.insert(&p).await.unwrap();

        assert!(memory.record_votes(p.id, &["2".to_string()]).await.unwrap());
        assert!(memory.record_votes(p.id, &["2".to_string()]).await.unwrap());

        let stored: Poll = memory
            .find_one(Poll::COLLECTION, "_id", &Bson::ObjectId(p.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.options[0].votes, 0);
        assert_eq!(stored.options[1].votes, 2);

        assert!(!memory.record_votes(ObjectId::new(), &["1".to_string()]).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_collection_pages_are_empty() {
        let memory = MemoryStore::default();
        let boundary = Boundary::new(DateTime::from_millis(0), ObjectId::new());
        let page: Vec<Poll> = memory
            .page(&PageRequest::new(PageAnchor::After(boundary)))
            .await
            .unwrap();
        assert!(page.is_empty());
    }
}
