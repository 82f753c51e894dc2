use crate::api::movies::filter::{FieldFilter, MovieFilter};
use crate::api::movies::pagination::PageWindow;
use crate::api::movies::sort::{SortDirection, SortField, SortSpec};
use crate::database::{DbError, MovieStore};
use async_trait::async_trait;
use common_types::Movie;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, info};

/// Movie documents in the `movie` table, one JSONB `document` per row.
///
/// Field access goes through typed `CASE` expressions so a document with an unexpected shape
/// behaves as if the field were missing, the same way [`Movie`] deserialization treats it.
#[derive(Clone)]
pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or replaces documents by id in a single transaction. With `replace_all`, every
    /// stored movie not in `documents` is deleted in that same transaction, so a failed write
    /// leaves the collection untouched.
    pub async fn upsert_documents(
        &self,
        documents: &[(String, Value)],
        replace_all: bool,
    ) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;
        if replace_all {
            let deleted = sqlx::query("DELETE FROM movie")
                .execute(&mut *tx)
                .await?
                .rows_affected();
            info!("Replacing {deleted} stored movies");
        }

        let mut written = 0;
        for (id, document) in documents {
            written += sqlx::query(
                r"
                INSERT INTO movie (id, document)
                VALUES ($1, $2)
                ON CONFLICT (id) DO UPDATE SET document = EXCLUDED.document
                ",
            )
            .bind(id)
            .bind(Json(document))
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;
        Ok(written)
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn count(&self, filter: &MovieFilter) -> Result<u64, DbError> {
        let mut query = count_query(filter);
        debug!(sql = query.sql(), "Counting movies");
        let count: i64 = query.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn find(
        &self,
        filter: &MovieFilter,
        sort: SortSpec,
        window: PageWindow,
    ) -> Result<Vec<Movie>, DbError> {
        let mut query = find_query(filter, sort, window);
        debug!(sql = query.sql(), "Finding movies");
        let rows = query.build().fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| -> Result<Movie, DbError> {
                let id: String = row.try_get("id")?;
                let Json(mut document): Json<Value> = row.try_get("document")?;
                // The row id is authoritative over whatever `_id` the document carries.
                if let Value::Object(map) = &mut document {
                    map.insert("_id".to_owned(), Value::String(id));
                }
                Ok(Movie::from_document(document)?)
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn count_query(filter: &MovieFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT count(*) FROM movie");
    push_filter(&mut query, filter);
    query
}

fn find_query(
    filter: &MovieFilter,
    sort: SortSpec,
    window: PageWindow,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT id, document FROM movie");
    push_filter(&mut query, filter);
    push_order(&mut query, sort);
    query
        .push(" OFFSET ")
        .push_bind(i64::try_from(window.skip).unwrap_or(i64::MAX))
        .push(" LIMIT ")
        .push_bind(i64::try_from(window.limit).unwrap_or(i64::MAX));
    query
}

fn text_field(field: &str) -> String {
    format!(
        "(CASE WHEN jsonb_typeof(document -> '{field}') = 'string' THEN document ->> '{field}' END)"
    )
}

fn number_field(field: &str) -> String {
    format!(
        "(CASE WHEN jsonb_typeof(document -> '{field}') = 'number' THEN (document ->> '{field}')::float8 END)"
    )
}

/// `YYYY-MM-DD` prefix of `release_date`, which sorts and compares chronologically as text.
fn release_date_field() -> String {
    format!("left({}, 10) COLLATE \"C\"", text_field("release_date"))
}

fn push_filter(query: &mut QueryBuilder<'static, Postgres>, filter: &MovieFilter) {
    if filter.is_empty() {
        return;
    }
    query.push(" WHERE TRUE");
    for clause in &filter.clauses {
        query.push(" AND ");
        match clause {
            FieldFilter::LanguageEquals(language) => {
                query
                    .push(text_field("original_language"))
                    .push(" = ")
                    .push_bind(language.clone());
            }
            FieldFilter::MinRating(min) => {
                query
                    .push(number_field("average_rating"))
                    .push(" >= ")
                    .push_bind(*min);
            }
            FieldFilter::AdultEquals(adult) => {
                query
                    .push("document -> 'adult' = to_jsonb(")
                    .push_bind(*adult)
                    .push("::boolean)");
            }
            FieldFilter::CountryContains(needle) => {
                push_contains(query, "production_countries", needle);
            }
            FieldFilter::ReleaseDateBetween { from, to } => {
                query
                    .push(release_date_field())
                    .push(" BETWEEN ")
                    .push_bind(from.format("%Y-%m-%d").to_string())
                    .push(" AND ")
                    .push_bind(to.format("%Y-%m-%d").to_string());
            }
            FieldFilter::RuntimeBetween { min, max } => {
                query
                    .push(number_field("runtime"))
                    .push(" BETWEEN ")
                    .push_bind(*min as f64)
                    .push(" AND ")
                    .push_bind(*max as f64);
            }
            FieldFilter::GenreContains(needle) => {
                push_contains(query, "genres", needle);
            }
        }
    }
}

/// Case-insensitive, literal substring match against a field that holds either a string or an
/// array of strings.
fn push_contains(query: &mut QueryBuilder<'static, Postgres>, field: &str, needle: &str) {
    query
        .push(format!(
            "EXISTS (SELECT 1 FROM jsonb_path_query(document, 'lax $.{field}[*]') AS entry(value) \
             WHERE jsonb_typeof(entry.value) = 'string' \
             AND strpos(lower(entry.value #>> '{{}}'), lower("
        ))
        .push_bind(needle.to_owned())
        .push(")) > 0)");
}

fn push_order(query: &mut QueryBuilder<'static, Postgres>, sort: SortSpec) {
    let expression = match sort.field {
        SortField::AverageRating => number_field("average_rating"),
        SortField::Title => format!("{} COLLATE \"C\"", text_field("title")),
        SortField::ReleaseDate => release_date_field(),
        SortField::Runtime => number_field("runtime"),
    };
    // Missing values order lowest, like they do in memory.
    let direction = match sort.direction {
        SortDirection::Ascending => " ASC NULLS FIRST",
        SortDirection::Descending => " DESC NULLS LAST",
    };
    query.push(" ORDER BY ").push(expression).push(direction);
}
