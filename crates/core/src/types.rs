/// Internal row ids are SQLite `INTEGER PRIMARY KEY` values.
///
/// These never leave the server as account identities; accounts are
/// addressed externally by their [`PublicId`].
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable, non-sequential external handle for an account.
pub type PublicId = uuid::Uuid;
