pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod query_state;
pub mod sanitize;
pub mod schedule;
pub mod search;
pub mod server;
