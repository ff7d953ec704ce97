use serde::Serialize;

use crate::db::store::Store;
use crate::pagination::{Boundary, PageCursor, Paginated};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PageMeta {
    pub page: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_cursor: Option<String>,
    pub next_cursor: Option<String>,
}

impl PageMeta {
    pub fn of<T: Paginated>(cursor: &PageCursor<T>) -> Self {
        Self {
            page: cursor.page(),
            has_prev: cursor.can_prev(),
            has_next: cursor.can_next(),
            prev_cursor: cursor
                .first()
                .filter(|_| cursor.can_prev())
                .map(|b| b.encode()),
            next_cursor: cursor
                .last()
                .filter(|_| cursor.can_next())
                .map(|b| b.encode()),
        }
    }
}

/// Rebuilds a list cursor from the query string and fetches the requested
/// page. `page` is the number of the page being asked for.
pub async fn open_cursor<T: Paginated>(
    store: &Store,
    page: Option<u32>,
    after: Option<&str>,
    before: Option<&str>,
) -> AppResult<PageCursor<T>> {
    match (after, before) {
        (Some(_), Some(_)) => Err(AppError::BadRequest(
            "Use either 'after' or 'before', not both".to_string(),
        )),
        (Some(token), None) => {
            let page = page.unwrap_or(2);
            if page < 2 {
                return Err(AppError::BadRequest(
                    "A page after a cursor starts at 2".to_string(),
                ));
            }

            let mut cursor = PageCursor::resume_after(page - 1, Boundary::decode(token)?);
            if !cursor.next(store).await? {
                return Err(AppError::NotFound("No more entries".to_string()));
            }
            Ok(cursor)
        }
        (None, Some(token)) => {
            let page = page.unwrap_or(1).max(1);
            let current = page
                .checked_add(1)
                .ok_or_else(|| AppError::BadRequest("Page number out of range".to_string()))?;
            let mut cursor = PageCursor::resume_before(current, Boundary::decode(token)?);
            cursor.prev(store).await?;
            Ok(cursor)
        }
        (None, None) => {
            let mut cursor = PageCursor::new();
            cursor.load(store).await?;
            Ok(cursor)
        }
    }
}
