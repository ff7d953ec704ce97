//! Cursor pagination over the timestamp-ordered collections.
//!
//! Lists are ordered newest first by the record's timestamp field, with `_id`
//! breaking ties so that every record has a distinct position. A page is
//! fetched relative to a [`Boundary`]: strictly after the last record of the
//! current page ("next") or strictly before its first record ("prev").
//!
//! [`PageCursor`] keeps the state of one list view: the loaded records, the
//! first/last boundaries of the latest fetch and a one-based page counter.
//! Only one page of boundaries is retained, so the cursor walks one step at
//! a time and cannot jump to an arbitrary page.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::db::store::{Record, Store};
use crate::utils::error::{AppError, AppResult};

pub const PAGE_SIZE: usize = 5;

pub trait Paginated: Record {
    const TIMESTAMP_FIELD: &'static str;

    fn boundary(&self) -> Boundary;
}

/// Position of a record in the list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub at: DateTime,
    pub id: ObjectId,
}

impl Boundary {
    pub fn new(at: DateTime, id: ObjectId) -> Self {
        Self { at, id }
    }

    /// Ordering key; larger keys come first in a list.
    pub fn key(&self) -> (i64, [u8; 12]) {
        (self.at.timestamp_millis(), self.id.bytes())
    }

    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("{}:{}", self.at.timestamp_millis(), self.id.to_hex()))
    }

    pub fn decode(token: &str) -> AppResult<Self> {
        let invalid = || AppError::BadRequest("Invalid page cursor".to_string());

        let raw = URL_SAFE_NO_PAD.decode(token.trim()).map_err(|_| invalid())?;
        let raw = String::from_utf8(raw).map_err(|_| invalid())?;
        let (millis, id) = raw.split_once(':').ok_or_else(invalid)?;

        let millis: i64 = millis.parse().map_err(|_| invalid())?;
        let id = ObjectId::parse_str(id).map_err(|_| invalid())?;

        Ok(Self::new(DateTime::from_millis(millis), id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAnchor {
    Start,
    After(Boundary),
    Before(Boundary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub anchor: PageAnchor,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(anchor: PageAnchor) -> Self {
        Self {
            anchor,
            limit: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageCursor<T> {
    items: Vec<T>,
    first: Option<Boundary>,
    last: Option<Boundary>,
    page: u32,
    has_next: bool,
}

impl<T: Paginated> PageCursor<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            first: None,
            last: None,
            page: 1,
            has_next: true,
        }
    }

    /// Cursor positioned on `page`, whose last record is `last`.
    pub fn resume_after(page: u32, last: Boundary) -> Self {
        Self {
            last: Some(last),
            page: page.max(1),
            ..Self::new()
        }
    }

    /// Cursor positioned on `page`, whose first record is `first`.
    pub fn resume_before(page: u32, first: Boundary) -> Self {
        Self {
            first: Some(first),
            page: page.max(1),
            ..Self::new()
        }
    }

    pub async fn load(&mut self, store: &Store) -> AppResult<()> {
        let items = store.page::<T>(&PageRequest::new(PageAnchor::Start)).await?;
        self.replace(items);
        self.page = 1;
        Ok(())
    }

    /// Moves one page forward. Returns false when there is nothing further.
    pub async fn next(&mut self, store: &Store) -> AppResult<bool> {
        if !self.can_next() {
            return Ok(false);
        }

        let Some(last) = self.last else {
            self.load(store).await?;
            return Ok(true);
        };

        let items = store.page::<T>(&PageRequest::new(PageAnchor::After(last))).await?;
        if items.is_empty() {
            self.has_next = false;
            return Ok(false);
        }

        self.replace(items);
        self.page += 1;
        Ok(true)
    }

    /// Moves one page back. A no-op on the first page.
    pub async fn prev(&mut self, store: &Store) -> AppResult<bool> {
        if !self.can_prev() {
            return Ok(false);
        }

        let Some(first) = self.first else {
            self.load(store).await?;
            return Ok(true);
        };

        let items = store.page::<T>(&PageRequest::new(PageAnchor::Before(first))).await?;
        if items.len() < PAGE_SIZE {
            // Reached the head of the list; realign on a full first page.
            self.load(store).await?;
            return Ok(true);
        }

        self.replace(items);
        self.page -= 1;
        self.has_next = true;
        Ok(true)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.has_next
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn first(&self) -> Option<Boundary> {
        self.first
    }

    pub fn last(&self) -> Option<Boundary> {
        self.last
    }

    fn replace(&mut self, items: Vec<T>) {
        self.first = items.first().map(Paginated::boundary);
        self.last = items.last().map(Paginated::boundary);
        self.has_next = items.len() == PAGE_SIZE;
        self.items = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification_models::Notification;

    fn notification(title: &str, millis: i64) -> Notification {
        Notification {
            id: ObjectId::new(),
            title: title.to_string(),
            content: format!("{title} body"),
            category: "General".to_string(),
            date: DateTime::from_millis(millis),
            attachments: Vec::new(),
        }
    }

    /// Seeds `count` notifications; "n0" is the oldest.
    async fn seeded(count: i64) -> Store {
        let store = Store::in_memory();
        for i in 0..count {
            store
                .insert(&notification(&format!("n{i}"), 1_700_000_000_000 + i * 1_000))
                .await
                .unwrap();
        }
        store
    }

    fn titles(cursor: &PageCursor<Notification>) -> Vec<String> {
        cursor.items().iter().map(|n| n.title.clone()).collect()
    }

    #[test]
    fn boundary_token_survives_the_query_string() {
        let boundary = Boundary::new(DateTime::from_millis(1_700_000_123_456), ObjectId::new());
        let token = boundary.encode();

        assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(Boundary::decode(&token).unwrap(), boundary);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(matches!(Boundary::decode("%%%"), Err(AppError::BadRequest(_))));
        let no_separator = URL_SAFE_NO_PAD.encode("1700000000000");
        assert!(Boundary::decode(&no_separator).is_err());
        let bad_id = URL_SAFE_NO_PAD.encode("1700000000000:not-an-object-id");
        assert!(Boundary::decode(&bad_id).is_err());
    }

    #[tokio::test]
    async fn first_page_holds_the_five_most_recent() {
        let store = seeded(12).await;
        let mut cursor = PageCursor::<Notification>::new();
        cursor.load(&store).await.unwrap();

        assert_eq!(cursor.page(), 1);
        assert_eq!(titles(&cursor), ["n11", "n10", "n9", "n8", "n7"]);
        assert!(!cursor.can_prev());
        assert!(cursor.can_next());
    }

    #[tokio::test]
    async fn next_continues_without_overlap_or_gap() {
        let store = seeded(12).await;
        let mut cursor = PageCursor::<Notification>::new();
        cursor.load(&store).await.unwrap();

        assert!(cursor.next(&store).await.unwrap());
        assert_eq!(cursor.page(), 2);
        assert_eq!(titles(&cursor), ["n6", "n5", "n4", "n3", "n2"]);

        assert!(cursor.next(&store).await.unwrap());
        assert_eq!(cursor.page(), 3);
        assert_eq!(titles(&cursor), ["n1", "n0"]);
        assert!(!cursor.can_next());

        assert!(!cursor.next(&store).await.unwrap());
        assert_eq!(titles(&cursor), ["n1", "n0"]);
    }

    #[tokio::test]
    async fn prev_on_first_page_changes_nothing() {
        let store = seeded(7).await;
        let mut cursor = PageCursor::<Notification>::new();
        cursor.load(&store).await.unwrap();
        let before = titles(&cursor);

        assert!(!cursor.prev(&store).await.unwrap());
        assert_eq!(cursor.page(), 1);
        assert_eq!(titles(&cursor), before);
    }

    #[tokio::test]
    async fn prev_returns_the_page_just_before() {
        let store = seeded(16).await;
        let mut cursor = PageCursor::<Notification>::new();
        cursor.load(&store).await.unwrap();
        cursor.next(&store).await.unwrap();
        cursor.next(&store).await.unwrap();
        assert_eq!(titles(&cursor), ["n5", "n4", "n3", "n2", "n1"]);

        assert!(cursor.prev(&store).await.unwrap());
        assert_eq!(cursor.page(), 2);
        assert_eq!(titles(&cursor), ["n10", "n9", "n8", "n7", "n6"]);
        assert!(cursor.can_next());

        assert!(cursor.prev(&store).await.unwrap());
        assert_eq!(cursor.page(), 1);
        assert_eq!(titles(&cursor), ["n15", "n14", "n13", "n12", "n11"]);
    }

    #[tokio::test]
    async fn short_prev_realigns_on_the_first_page() {
        let store = seeded(8).await;
        let head = store
            .page::<Notification>(&PageRequest::new(PageAnchor::Start))
            .await
            .unwrap();
        // Resume as if page 2 began right after the second newest record.
        let mut cursor = PageCursor::<Notification>::resume_before(2, head[2].boundary());

        assert!(cursor.prev(&store).await.unwrap());
        assert_eq!(cursor.page(), 1);
        assert_eq!(titles(&cursor), ["n7", "n6", "n5", "n4", "n3"]);
    }

    #[tokio::test]
    async fn equal_timestamps_are_split_by_id() {
        let store = Store::in_memory();
        for i in 0..7 {
            store
                .insert(&notification(&format!("t{i}"), 1_700_000_000_000))
                .await
                .unwrap();
        }

        let mut cursor = PageCursor::<Notification>::new();
        cursor.load(&store).await.unwrap();
        let mut seen = titles(&cursor);
        cursor.next(&store).await.unwrap();
        seen.extend(titles(&cursor));

        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 7);
    }

    #[tokio::test]
    async fn empty_collection_has_no_next_page() {
        let store = Store::in_memory();
        let mut cursor = PageCursor::<Notification>::new();
        cursor.load(&store).await.unwrap();

        assert!(cursor.items().is_empty());
        assert!(!cursor.can_next());
        assert!(!cursor.can_prev());
        assert_eq!(cursor.first(), None);
    }
}
