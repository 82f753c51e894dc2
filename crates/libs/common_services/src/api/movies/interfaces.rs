use crate::api::movies::filter::release_window;
use crate::api::movies::pagination::PageLimits;
use crate::api::movies::sort::SortBy;
use common_types::Movie;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Raw query-string parameters of `GET /api/movies`.
///
/// Everything is taken as a string so a malformed value never rejects the request; it just
/// doesn't constrain anything.
#[derive(Deserialize, IntoParams, ToSchema, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MovieQueryParams {
    /// 1-based page number, default 1.
    pub page: Option<String>,
    /// Page size, default 50.
    pub limit: Option<String>,
    /// Exact `original_language`, e.g. `en`.
    pub language: Option<String>,
    /// Minimum `average_rating`.
    pub min_rating: Option<String>,
    /// `true` matches adult titles only, any other value non-adult titles only.
    pub adult: Option<String>,
    /// Case-insensitive substring of a production country.
    pub country: Option<String>,
    /// Release year, matched with a tolerance of 3 years either way.
    pub year: Option<String>,
    /// Runtime in minutes, matched with a tolerance of 15 minutes either way.
    pub runtime: Option<String>,
    /// Case-insensitive substring of a genre.
    pub genre: Option<String>,
    /// One of `rating`, `title`, `release_date`, `runtime`. Defaults to `rating`.
    pub sort_by: Option<String>,
}

impl MovieQueryParams {
    /// Collects params from raw query-string pairs. A repeated key keeps its first value and
    /// unknown keys are ignored, so no query string is ever rejected.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "language" => &mut params.language,
                "minRating" => &mut params.min_rating,
                "adult" => &mut params.adult,
                "country" => &mut params.country,
                "year" => &mut params.year,
                "runtime" => &mut params.runtime,
                "genre" => &mut params.genre,
                "sortBy" => &mut params.sort_by,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// A movie search with every parameter parsed and defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSearchRequest {
    pub page: u64,
    pub limit: u64,
    pub language: Option<String>,
    pub min_rating: Option<f64>,
    pub adult: Option<bool>,
    pub country: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<i64>,
    pub genre: Option<String>,
    pub sort_by: SortBy,
}

impl Default for MovieSearchRequest {
    fn default() -> Self {
        Self::from_params(MovieQueryParams::default(), PageLimits::default())
    }
}

impl MovieSearchRequest {
    #[must_use]
    pub fn from_params(params: MovieQueryParams, limits: PageLimits) -> Self {
        Self {
            page: limits.page(params.page.as_deref().and_then(parse_int)),
            limit: limits.limit(params.limit.as_deref().and_then(parse_int)),
            language: non_empty(params.language),
            min_rating: params.min_rating.as_deref().and_then(parse_float),
            // Present at all means constrained, even when empty.
            adult: params.adult.map(|adult| adult == "true"),
            country: non_empty(params.country),
            year: params
                .year
                .as_deref()
                .and_then(parse_int)
                .and_then(|year| i32::try_from(year).ok())
                // A year whose window falls off the calendar is as unusable as one that
                // doesn't parse.
                .filter(|year| release_window(*year).is_some()),
            runtime: params.runtime.as_deref().and_then(parse_int),
            genre: non_empty(params.genre),
            sort_by: SortBy::parse_or_default(params.sort_by.as_deref()),
        }
    }
}

/// One page of search results.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoviePage {
    /// Number of movies matching the filters, over all pages.
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
    #[schema(value_type = Vec<Object>)]
    pub movies: Vec<Movie>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Reads the leading integer of a string, ignoring whatever follows it ("2001.5" and "90min"
/// both parse). Returns `None` when there are no leading digits.
fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
