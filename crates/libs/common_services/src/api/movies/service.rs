use crate::api::movies::error::MovieSearchError;
use crate::api::movies::filter::build_filter;
use crate::api::movies::interfaces::{MoviePage, MovieSearchRequest};
use crate::api::movies::pagination::{PageWindow, total_pages};
use crate::database::MovieStore;
use tracing::info;

/// Runs a movie search: one count over the whole filtered set, one page fetch.
///
/// The two store calls are independent, so `total` and `movies` can disagree if the collection
/// changes in between.
pub async fn search_movies(
    store: &dyn MovieStore,
    request: &MovieSearchRequest,
) -> Result<MoviePage, MovieSearchError> {
    let filter = build_filter(request);
    let sort = request.sort_by.spec();
    let window = PageWindow::new(request.page, request.limit);

    let total = store.count(&filter).await?;
    info!("Total matching movies: {total}");

    let movies = store.find(&filter, sort, window).await?;
    info!("Returning {} movies", movies.len());

    Ok(MoviePage {
        total,
        total_pages: total_pages(total, request.limit),
        current_page: request.page,
        movies,
    })
}
