/// Document keys are caller-chosen natural keys (users, companies) or
/// generated UUID strings (projects, tasks).
pub type DocKey = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh random document key.
pub fn new_doc_key() -> DocKey {
    uuid::Uuid::new_v4().to_string()
}
