pub mod catalog_api;
pub mod error;
pub mod redis;
