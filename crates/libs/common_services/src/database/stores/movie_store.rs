use crate::api::movies::filter::MovieFilter;
use crate::api::movies::pagination::PageWindow;
use crate::api::movies::sort::SortSpec;
use crate::database::DbError;
use async_trait::async_trait;
use common_types::Movie;

/// Read access to the movie collection.
///
/// `count` and `find` are independent calls; a store gives no guarantee that both see the same
/// snapshot of the collection.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Number of movies matching `filter`.
    async fn count(&self, filter: &MovieFilter) -> Result<u64, DbError>;

    /// The movies matching `filter`, ordered by `sort`, restricted to `window`.
    async fn find(
        &self,
        filter: &MovieFilter,
        sort: SortSpec,
        window: PageWindow,
    ) -> Result<Vec<Movie>, DbError>;

    /// Cheap round trip to check the store is reachable.
    async fn ping(&self) -> Result<(), DbError>;
}
