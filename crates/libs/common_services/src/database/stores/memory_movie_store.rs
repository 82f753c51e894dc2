use crate::api::movies::filter::MovieFilter;
use crate::api::movies::pagination::PageWindow;
use crate::api::movies::sort::SortSpec;
use crate::database::{DbError, MovieStore};
use async_trait::async_trait;
use common_types::Movie;
use serde_json::Value;
use std::sync::Arc;

/// A read-only movie collection held in memory.
///
/// Filtering and ordering follow the same rules as [`crate::database::PgMovieStore`]; the
/// natural order is insertion order.
#[derive(Clone, Default)]
pub struct MemoryMovieStore {
    movies: Arc<[Movie]>,
}

impl MemoryMovieStore {
    #[must_use]
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: movies.into(),
        }
    }

    pub fn from_documents(documents: impl IntoIterator<Item = Value>) -> Result<Self, DbError> {
        let movies = documents
            .into_iter()
            .map(Movie::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(movies))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn count(&self, filter: &MovieFilter) -> Result<u64, DbError> {
        Ok(self.movies.iter().filter(|m| filter.matches(m)).count() as u64)
    }

    async fn find(
        &self,
        filter: &MovieFilter,
        sort: SortSpec,
        window: PageWindow,
    ) -> Result<Vec<Movie>, DbError> {
        let mut matched: Vec<&Movie> = self.movies.iter().filter(|m| filter.matches(m)).collect();
        // Stable, so ties keep insertion order.
        matched.sort_by(|a, b| sort.compare(a, b));

        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
