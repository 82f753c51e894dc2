use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use common_services::database::PgMovieStore;
use common_services::utils::nice_id;
use common_types::Movie;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Length of generated ids, matching a hex object id.
const GENERATED_ID_LENGTH: usize = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub read: usize,
    pub skipped: usize,
    pub written: u64,
}

pub async fn import_movies(
    store: &PgMovieStore,
    path: &Path,
    truncate: bool,
) -> Result<ImportSummary> {
    let documents = read_documents(path).await?;
    let read = documents.len();
    let normalized = normalize_documents(documents);
    let skipped = read - normalized.len();

    let written = store.upsert_documents(&normalized, truncate).await?;
    info!("Wrote {written} movies");

    Ok(ImportSummary {
        read,
        skipped,
        written,
    })
}

/// Reads a JSON array of documents, or one document per line.
pub async fn read_documents(path: &Path) -> Result<Vec<Value>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Cannot read {}", path.display()))?;
    parse_documents(&content)
}

fn parse_documents(content: &str) -> Result<Vec<Value>> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).wrap_err("Invalid JSON array");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| eyre!("Invalid JSON on line {}: {}", index + 1, e))
        })
        .collect()
}

/// Normalizes documents into `(id, document)` pairs ready for the store. Documents without an
/// `_id` get a generated one; documents that are not objects are skipped.
#[must_use]
pub fn normalize_documents(documents: Vec<Value>) -> Vec<(String, Value)> {
    documents
        .into_iter()
        .enumerate()
        .filter_map(|(index, document)| match normalize(document) {
            Ok(normalized) => Some(normalized),
            Err(e) => {
                warn!("Skipping document {index}: {e}");
                None
            }
        })
        .collect()
}

fn normalize(mut document: Value) -> Result<(String, Value)> {
    let Value::Object(map) = &mut document else {
        return Err(eyre!("not a JSON object"));
    };
    if map.get("_id").is_none_or(Value::is_null) {
        map.insert(
            "_id".to_owned(),
            Value::String(nice_id(GENERATED_ID_LENGTH)),
        );
    }

    let movie = Movie::from_document(document)?;
    Ok((movie.id.clone(), movie.to_document()?))
}
