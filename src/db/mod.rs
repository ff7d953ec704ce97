pub mod connection;
pub mod memory;
pub mod store;
