use thiserror::Error;

/// A failure reading or writing the movie collection.
#[derive(Debug, Error)]
pub enum DbError {
    /// The store could not be reached or rejected the query.
    #[error("Movie store query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A stored or imported document is not a usable movie (e.g. it has no id).
    #[error("Malformed movie document: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
