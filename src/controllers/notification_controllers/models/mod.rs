use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controllers::paging::PageMeta;
use crate::models::{notification_models::Notification, to_utc};

const EXCERPT_CHARS: usize = 100;

#[derive(Deserialize, Debug)]
pub struct CreateNotificationRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct NotificationListQuery {
    pub page: Option<u32>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct NotificationResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub attachments: Vec<String>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.to_hex(),
            title: notification.title,
            content: notification.content,
            category: notification.category,
            date: to_utc(notification.date),
            attachments: notification.attachments,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct NotificationSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl From<&Notification> for NotificationSummary {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_hex(),
            title: notification.title.clone(),
            excerpt: notification.content.chars().take(EXCERPT_CHARS).collect(),
            category: notification.category.clone(),
            date: to_utc(notification.date),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct NotificationPageResponse {
    pub items: Vec<NotificationSummary>,
    pub categories: Vec<String>,
    #[serde(flatten)]
    pub meta: PageMeta,
}
