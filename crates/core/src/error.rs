/// Domain error shared by the store, the ranking engine and the profile
/// queries.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Unknown ranking category: {0}")]
    InvalidCategory(String),

    /// The single "query failed" error. Raised for any entity store failure
    /// and never retried here.
    #[error("Query failed: {0}")]
    StoreUnavailable(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
