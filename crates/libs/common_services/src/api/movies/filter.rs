use crate::api::movies::interfaces::MovieSearchRequest;
use chrono::NaiveDate;
use common_types::Movie;

/// Release years match within this many years of the requested year, both ways.
pub const YEAR_TOLERANCE: i32 = 3;
/// Runtimes match within this many minutes of the requested runtime, both ways.
pub const RUNTIME_TOLERANCE: i64 = 15;

/// One constraint on a movie document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    /// `original_language` equals the value exactly.
    LanguageEquals(String),
    /// `average_rating >= value`.
    MinRating(f64),
    /// `adult` equals the value. A document without `adult` never matches.
    AdultEquals(bool),
    /// Some production country contains the value, ignoring case.
    CountryContains(String),
    /// `release_date` lies in `from..=to`.
    ReleaseDateBetween { from: NaiveDate, to: NaiveDate },
    /// `runtime` lies in `min..=max`.
    RuntimeBetween { min: i64, max: i64 },
    /// Some genre contains the value, ignoring case.
    GenreContains(String),
}

impl FieldFilter {
    #[must_use]
    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            Self::LanguageEquals(language) => {
                movie.original_language.as_deref() == Some(language.as_str())
            }
            Self::MinRating(min) => movie.average_rating.is_some_and(|rating| rating >= *min),
            Self::AdultEquals(adult) => movie.adult == Some(*adult),
            Self::CountryContains(needle) => any_contains(&movie.production_countries, needle),
            Self::ReleaseDateBetween { from, to } => movie
                .release_date
                .is_some_and(|date| *from <= date && date <= *to),
            Self::RuntimeBetween { min, max } => movie
                .runtime
                .is_some_and(|runtime| runtime >= *min as f64 && runtime <= *max as f64),
            Self::GenreContains(needle) => any_contains(&movie.genres, needle),
        }
    }
}

/// A conjunction of field constraints. No constraints matches every movie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub clauses: Vec<FieldFilter>,
}

impl MovieFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn matches(&self, movie: &Movie) -> bool {
        self.clauses.iter().all(|clause| clause.matches(movie))
    }
}

/// Translates a search request into a filter. Parameters that are absent on the request add no
/// clause at all.
#[must_use]
pub fn build_filter(request: &MovieSearchRequest) -> MovieFilter {
    let mut clauses = Vec::new();

    if let Some(language) = &request.language {
        clauses.push(FieldFilter::LanguageEquals(language.clone()));
    }
    if let Some(min_rating) = request.min_rating {
        clauses.push(FieldFilter::MinRating(min_rating));
    }
    if let Some(adult) = request.adult {
        clauses.push(FieldFilter::AdultEquals(adult));
    }
    if let Some(country) = &request.country {
        clauses.push(FieldFilter::CountryContains(country.clone()));
    }
    if let Some(range) = request.year.and_then(release_window) {
        clauses.push(range);
    }
    if let Some(runtime) = request.runtime {
        clauses.push(FieldFilter::RuntimeBetween {
            min: runtime.saturating_sub(RUNTIME_TOLERANCE),
            max: runtime.saturating_add(RUNTIME_TOLERANCE),
        });
    }
    if let Some(genre) = &request.genre {
        clauses.push(FieldFilter::GenreContains(genre.clone()));
    }

    MovieFilter { clauses }
}

/// Jan 1 of `year - 3` through Dec 31 of `year + 3`. Years whose window falls outside the
/// representable calendar add no constraint.
pub(crate) fn release_window(year: i32) -> Option<FieldFilter> {
    let from = NaiveDate::from_ymd_opt(year.checked_sub(YEAR_TOLERANCE)?, 1, 1)?;
    let to = NaiveDate::from_ymd_opt(year.checked_add(YEAR_TOLERANCE)?, 12, 31)?;
    Some(FieldFilter::ReleaseDateBetween { from, to })
}

fn any_contains(values: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    values
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}
