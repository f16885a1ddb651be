/// Infrastructure errors shared by catalog crates.
///
/// Domain failures (bad config, duplicate record ids) belong in the server
/// crate's own error type, which wraps `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("redis unavailable, degrading gracefully")]
    RedisUnavailable,
}
