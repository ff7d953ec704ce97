pub mod create_notification;
pub mod get_notification;
pub mod get_notifications;
pub mod models;
