use app_state::load_app_settings;
use clap::{Parser, Subcommand};
use color_eyre::Result;
use common_services::database::{PgMovieStore, get_db_pool};
use std::path::PathBuf;
use tasks::import::import_movies;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upsert movie documents from a JSON array or JSON-lines file.
    Import {
        path: PathBuf,
        /// Delete every stored movie before importing.
        #[clap(long, default_value_t = false, action)]
        truncate: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    color_eyre::install()?;

    let args = Args::parse();
    let settings = load_app_settings()?;
    let pool = get_db_pool(
        &settings.secrets.database_url,
        &settings.constants.database,
        true,
    )
    .await?;
    let store = PgMovieStore::new(pool);

    match args.command {
        Command::Import { path, truncate } => {
            let summary = import_movies(&store, &path, truncate).await?;
            info!(
                "Imported {} of {} documents from {} ({} skipped)",
                summary.written,
                summary.read,
                path.display(),
                summary.skipped
            );
        }
    }

    Ok(())
}
