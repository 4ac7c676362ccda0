/// Surrogate primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable external player identifier (the chat platform user id). Joins
/// characters, equipment and level progress.
pub type OwnerKey = String;
