use api::serve;
use app_state::load_app_settings;
use color_eyre::Result;
use common_services::database::{PgMovieStore, get_db_pool};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = load_app_settings()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("api={},tower_http=debug", settings.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = get_db_pool(
        &settings.secrets.database_url,
        &settings.constants.database,
        true,
    )
    .await?;
    info!("Connected to the movie database");

    serve(Arc::new(PgMovieStore::new(pool)), settings).await?;

    Ok(())
}
