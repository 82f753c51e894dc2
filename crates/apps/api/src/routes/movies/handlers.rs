use crate::api_state::ApiContext;
use axum::Json;
use axum::extract::{Query, State};
use common_services::api::movies::error::{ErrorResponse, MovieSearchError};
use common_services::api::movies::interfaces::{MoviePage, MovieQueryParams, MovieSearchRequest};
use common_services::api::movies::pagination::PageLimits;
use common_services::api::movies::service::search_movies;
use tracing::{info, instrument};

/// Search movies with optional filters, sorting and pagination.
///
/// Every parameter is optional. Values that cannot be parsed are ignored rather than rejected, and
/// a repeated parameter keeps its first value.
#[utoipa::path(
    get,
    path = "/api/movies",
    tag = "Movies",
    params(
        MovieQueryParams
    ),
    responses(
        (status = 200, description = "One page of matching movies", body = MoviePage),
        (status = 500, description = "The movie store could not be queried.", body = ErrorResponse),
    )
)]
#[instrument(skip(context))]
pub async fn get_movies(
    State(context): State<ApiContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<MoviePage>, MovieSearchError> {
    let params = MovieQueryParams::from_pairs(pairs);
    info!("Incoming movie query: {:?}", params);
    let limits = PageLimits::from(context.settings.constants.search);
    let request = MovieSearchRequest::from_params(params, limits);
    let page = search_movies(context.store.as_ref(), &request).await?;
    Ok(Json(page))
}
