use crate::routes::{movies, root};
use common_services::api::movies::error::ErrorResponse;
use common_services::api::movies::interfaces::MoviePage;
use common_services::api::movies::sort::SortBy;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        movies::handlers::get_movies,
    ),
    components(
        schemas(
            root::handlers::RootStatus,
            MoviePage,
            ErrorResponse,
            SortBy,
        ),
    ),
    tags(
        (name = "Movies", description = "Filtered, sorted and paginated movie search"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;
