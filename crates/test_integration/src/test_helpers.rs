use crate::runner::context::test_context::TestContext;
use color_eyre::Result;
use common_services::api::movies::interfaces::MoviePage;

pub async fn get_movies(context: &TestContext, query: &[(&str, &str)]) -> Result<MoviePage> {
    let response = context
        .http_client
        .get(context.url("/api/movies"))
        .query(query)
        .send()
        .await?
        .error_for_status()?;
    let page: MoviePage = response.json().await?;

    Ok(page)
}

pub fn movie_ids(page: &MoviePage) -> Vec<&str> {
    page.movies.iter().map(|m| m.id.as_str()).collect()
}

pub fn sorted_movie_ids(page: &MoviePage) -> Vec<&str> {
    let mut ids = movie_ids(page);
    ids.sort_unstable();
    ids
}
