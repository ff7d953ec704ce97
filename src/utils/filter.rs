//! Narrowing of an already loaded notification page. Nothing here reaches
//! the store, so a filter can only hide records, never surface new ones.

use crate::models::notification_models::Notification;

#[derive(Debug, Default, Clone)]
pub struct NotificationFilter {
    search: String,
    category: Option<String>,
}

impl NotificationFilter {
    pub fn new(search: Option<&str>, category: Option<&str>) -> Self {
        Self {
            search: search.map(str::to_lowercase).unwrap_or_default(),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }

    pub fn matches(&self, notification: &Notification) -> bool {
        let title_matches = self.search.is_empty()
            || notification.title.to_lowercase().contains(&self.search);
        let category_matches = self
            .category
            .as_deref()
            .map_or(true, |category| notification.category == category);

        title_matches && category_matches
    }

    pub fn apply<'a>(&self, page: &'a [Notification]) -> Vec<&'a Notification> {
        page.iter().filter(|n| self.matches(n)).collect()
    }
}

/// Distinct categories on the page, in first-seen order.
pub fn categories(page: &[Notification]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for notification in page {
        if !seen.contains(&notification.category) {
            seen.push(notification.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{oid::ObjectId, DateTime};

    fn notification(title: &str, category: &str) -> Notification {
        Notification {
            id: ObjectId::new(),
            title: title.to_string(),
            content: String::new(),
            category: category.to_string(),
            date: DateTime::now(),
            attachments: Vec::new(),
        }
    }

    fn page() -> Vec<Notification> {
        vec![
            notification("Meeting", "General"),
            notification("Holiday", "Events"),
            notification("Water outage", "General"),
        ]
    }

    #[test]
    fn search_is_a_case_insensitive_title_substring() {
        let page = page();
        let shown = NotificationFilter::new(Some("MEET"), None).apply(&page);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Meeting");
    }

    #[test]
    fn category_is_an_exact_match() {
        let page = page();
        let shown = NotificationFilter::new(None, Some("General")).apply(&page);
        let titles: Vec<&str> = shown.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Meeting", "Water outage"]);

        assert!(NotificationFilter::new(None, Some("general")).apply(&page).is_empty());
    }

    #[test]
    fn both_filters_combine() {
        let page = page();
        assert!(NotificationFilter::new(Some("holiday"), Some("General"))
            .apply(&page)
            .is_empty());
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let page = page();
        assert_eq!(NotificationFilter::new(Some(""), Some("")).apply(&page).len(), 3);
    }

    #[test]
    fn search_term_is_matched_as_typed() {
        let page = page();
        assert!(NotificationFilter::new(Some("meet "), None).apply(&page).is_empty());
        let shown = NotificationFilter::new(Some("water "), None).apply(&page);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Water outage");
    }

    #[test]
    fn categories_are_listed_once_in_order() {
        assert_eq!(categories(&page()), ["General", "Events"]);
    }
}
