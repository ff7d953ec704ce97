pub mod auth_controllers;
pub mod home;
pub mod notification_controllers;
pub mod paging;
pub mod poll_controllers;
