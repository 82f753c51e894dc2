use crate::runner::context::context_utils::create_test_database;
use crate::test_fixtures::fixture_documents;
use app_state::{AppSettings, load_settings_from_path};
use color_eyre::eyre::{Result, eyre};
use common_services::database::{MemoryMovieStore, MovieStore, PgMovieStore};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tasks::import::normalize_documents;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

const TEST_DATABASE_NAME: &str = "movies_integration_test";

/// Which store the API under test is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// The main context for our integration tests: the API served on a free local port over a store
/// seeded with the fixture movies.
pub struct TestContext {
    pub settings: AppSettings,
    pub http_client: Client,
    pub backend: StoreBackend,
    pub movie_count: usize,
    /// Direct handle on the store when it is Postgres-backed.
    pub postgres: Option<PgMovieStore>,
    api_handle: JoinHandle<()>,
}

impl TestContext {
    /// API over an in-memory store.
    pub async fn new() -> Result<Self> {
        info!("Setting up in-memory test environment...");
        let settings = load_test_settings()?;

        let store = MemoryMovieStore::from_documents(fixture_documents())?;
        let movie_count = store.len();

        Self::start(settings, Arc::new(store), StoreBackend::Memory, movie_count, None).await
    }

    /// API over a freshly created and migrated Postgres database next to `database_url`, seeded
    /// through the same normalization the importer uses.
    pub async fn with_postgres(database_url: &str) -> Result<Self> {
        info!("Setting up Postgres test environment...");
        let mut settings = load_test_settings()?;
        settings.secrets.database_url = database_url.to_owned();

        let pool = create_test_database(
            database_url,
            TEST_DATABASE_NAME,
            &settings.constants.database,
        )
        .await?;
        let store = PgMovieStore::new(pool);
        let documents = normalize_documents(fixture_documents());
        let movie_count = documents.len();
        store.upsert_documents(&documents, true).await?;

        Self::start(
            settings,
            Arc::new(store.clone()),
            StoreBackend::Postgres,
            movie_count,
            Some(store),
        )
        .await
    }

    async fn start(
        mut settings: AppSettings,
        store: Arc<dyn MovieStore>,
        backend: StoreBackend,
        movie_count: usize,
        postgres: Option<PgMovieStore>,
    ) -> Result<Self> {
        // 1. Bind a free port and point public_url at it
        let listener = TcpListener::bind((settings.api.host.as_str(), 0)).await?;
        let addr = listener.local_addr()?;
        settings.api.port = addr.port();
        settings.api.public_url = format!("http://{addr}");

        // 2. Spawn the API as a background task
        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve_with_listener(listener, store, api_settings).await {
                error!("API server failed: {}", e);
            }
        });

        // 3. Wait for the API to be ready to accept traffic
        let http_client = Client::new();
        Self::wait_for_healthy_api(&settings, &http_client).await?;

        info!("Test environment is ready ({backend} store, {movie_count} movies).");
        Ok(Self {
            settings,
            http_client,
            backend,
            movie_count,
            postgres,
            api_handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.api.public_url)
    }

    /// Polls the `/health` endpoint until it receives a successful response or times out.
    async fn wait_for_healthy_api(settings: &AppSettings, http_client: &Client) -> Result<()> {
        for attempt in 1..=20 {
            let health_url = format!("{}/health", &settings.api.public_url);
            match http_client.get(&health_url).send().await {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) => {
                    warn!(
                        "Health check attempt {} returned {}",
                        attempt,
                        response.status()
                    );
                }
                Err(e) => {
                    warn!("Health check attempt {} failed: {:?}", attempt, e);
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Err(eyre!(
            "API did not become healthy within the timeout period."
        ))
    }
}

fn load_test_settings() -> Result<AppSettings> {
    let settings_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets/settings.yaml")
        .canonicalize()?;
    load_settings_from_path(&settings_path, false)
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.api_handle.abort();
    }
}
