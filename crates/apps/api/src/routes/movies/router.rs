use crate::api_state::ApiContext;
use crate::movies::handlers::get_movies;
use axum::{Router, routing::get};

pub fn movies_public_router() -> Router<ApiContext> {
    Router::new().route("/api/movies", get(get_movies))
}
