use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    Database,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::db::memory::MemoryStore;
use crate::models::poll_models::Poll;
use crate::pagination::{Boundary, PageAnchor, PageRequest, Paginated};
use crate::utils::error::AppResult;

/// A document type persisted in its own collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;
    /// Fields backed by a unique index.
    const UNIQUE_FIELDS: &'static [&'static str] = &[];
}

#[derive(Clone)]
pub enum Store {
    Mongo(Database),
    Memory(MemoryStore),
}

impl Store {
    pub fn in_memory() -> Self {
        Store::Memory(MemoryStore::default())
    }

    pub async fn insert<T: Record>(&self, item: &T) -> AppResult<()> {
        match self {
            Store::Mongo(db) => {
                db.collection::<T>(T::COLLECTION).insert_one(item).await?;
                Ok(())
            }
            Store::Memory(memory) => memory.insert(item).await,
        }
    }

    pub async fn find_by_id<T: Record>(&self, id: ObjectId) -> AppResult<Option<T>> {
        match self {
            Store::Mongo(db) => Ok(db
                .collection::<T>(T::COLLECTION)
                .find_one(doc! { "_id": id })
                .await?),
            Store::Memory(memory) => memory.find_one(T::COLLECTION, "_id", &Bson::ObjectId(id)).await,
        }
    }

    pub async fn find_by_field<T: Record>(&self, field: &str, value: &str) -> AppResult<Option<T>> {
        match self {
            Store::Mongo(db) => {
                let mut filter = Document::new();
                filter.insert(field, value);
                Ok(db.collection::<T>(T::COLLECTION).find_one(filter).await?)
            }
            Store::Memory(memory) => {
                memory
                    .find_one(T::COLLECTION, field, &Bson::String(value.to_string()))
                    .await
            }
        }
    }

    /// One window of the list, newest first.
    pub async fn page<T: Paginated>(&self, request: &PageRequest) -> AppResult<Vec<T>> {
        match self {
            Store::Mongo(db) => {
                let (filter, sort) = range_query(T::TIMESTAMP_FIELD, request.anchor);
                let mut items: Vec<T> = db
                    .collection::<T>(T::COLLECTION)
                    .find(filter)
                    .sort(sort)
                    .limit(request.limit as i64)
                    .await?
                    .try_collect()
                    .await?;

                if matches!(request.anchor, PageAnchor::Before(_)) {
                    items.reverse();
                }
                Ok(items)
            }
            Store::Memory(memory) => memory.page(request).await,
        }
    }

    /// Adds one vote to each listed option of a poll in a single update.
    /// Returns false when the poll does not exist.
    pub async fn record_votes(&self, poll_id: ObjectId, option_ids: &[String]) -> AppResult<bool> {
        match self {
            Store::Mongo(db) => {
                let result = db
                    .collection::<Poll>(Poll::COLLECTION)
                    .update_one(
                        doc! { "_id": poll_id },
                        doc! { "$inc": { "options.$[opt].votes": 1 } },
                    )
                    .array_filters(vec![doc! { "opt.id": { "$in": option_ids.to_vec() } }])
                    .await?;

                Ok(result.matched_count > 0)
            }
            Store::Memory(memory) => memory.record_votes(poll_id, option_ids).await,
        }
    }
}

/// Filter and sort documents for a page anchored at `anchor`. Pages before a
/// boundary are read in ascending order and must be reversed by the caller.
fn range_query(field: &str, anchor: PageAnchor) -> (Document, Document) {
    let descending = sort_on(field, -1);

    match anchor {
        PageAnchor::Start => (Document::new(), descending),
        PageAnchor::After(boundary) => (beyond(field, &boundary, "$lt"), descending),
        PageAnchor::Before(boundary) => (beyond(field, &boundary, "$gt"), sort_on(field, 1)),
    }
}

fn sort_on(field: &str, direction: i32) -> Document {
    let mut sort = Document::new();
    sort.insert(field, direction);
    sort.insert("_id", direction);
    sort
}

fn beyond(field: &str, boundary: &Boundary, op: &str) -> Document {
    let mut earlier = Document::new();
    earlier.insert(field, operator(op, boundary.at));

    let mut tied = Document::new();
    tied.insert(field, boundary.at);
    tied.insert("_id", operator(op, boundary.id));

    doc! { "$or": [earlier, tied] }
}

fn operator(op: &str, value: impl Into<Bson>) -> Document {
    let mut expr = Document::new();
    expr.insert(op, value.into());
    expr
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::DateTime;

    #[test]
    fn start_query_sorts_newest_first() {
        let (filter, sort) = range_query("date", PageAnchor::Start);
        assert!(filter.is_empty());
        assert_eq!(sort, doc! { "date": -1, "_id": -1 });
    }

    #[test]
    fn after_query_is_strictly_past_the_boundary() {
        let boundary = Boundary::new(DateTime::from_millis(42), ObjectId::new());
        let (filter, sort) = range_query("created_at", PageAnchor::After(boundary));

        assert_eq!(
            filter,
            doc! { "$or": [
                { "created_at": { "$lt": boundary.at } },
                { "created_at": boundary.at, "_id": { "$lt": boundary.id } },
            ] }
        );
        assert_eq!(sort, doc! { "created_at": -1, "_id": -1 });
    }

    #[test]
    fn before_query_reads_upwards() {
        let boundary = Boundary::new(DateTime::from_millis(42), ObjectId::new());
        let (filter, sort) = range_query("date", PageAnchor::Before(boundary));

        assert_eq!(
            filter,
            doc! { "$or": [
                { "date": { "$gt": boundary.at } },
                { "date": boundary.at, "_id": { "$gt": boundary.id } },
            ] }
        );
        assert_eq!(sort, doc! { "date": 1, "_id": 1 });
    }
}
