//! Shared primitive aliases.

/// Primary keys (`BIGSERIAL`) for species and users alike; a species'
/// `author` is a user's `DbId`.
pub type DbId = i64;

/// UTC timestamp as stored in `TIMESTAMPTZ` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
