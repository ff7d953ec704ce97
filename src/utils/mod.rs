pub mod error;
pub mod filter;
pub mod password;
pub mod session;
pub mod tally;
