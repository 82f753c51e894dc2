use common_types::Movie;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use utoipa::ToSchema;

/// The `sortBy` options accepted by the movie search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Rating,
    Title,
    ReleaseDate,
    Runtime,
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating" => Ok(Self::Rating),
            "title" => Ok(Self::Title),
            "release_date" => Ok(Self::ReleaseDate),
            "runtime" => Ok(Self::Runtime),
            _ => Err(()),
        }
    }
}

impl SortBy {
    /// Unknown or missing keys sort by rating.
    #[must_use]
    pub fn parse_or_default(key: Option<&str>) -> Self {
        key.and_then(|key| key.parse().ok()).unwrap_or_default()
    }

    #[must_use]
    pub const fn spec(self) -> SortSpec {
        match self {
            Self::Rating => SortSpec::new(SortField::AverageRating, SortDirection::Descending),
            Self::Title => SortSpec::new(SortField::Title, SortDirection::Ascending),
            Self::ReleaseDate => SortSpec::new(SortField::ReleaseDate, SortDirection::Descending),
            Self::Runtime => SortSpec::new(SortField::Runtime, SortDirection::Descending),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    AverageRating,
    Title,
    ReleaseDate,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A single sort key. There is no tie-break: records comparing equal keep whatever order the
/// store hands them out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Orders two movies by this spec. A missing value orders below any present value, so it
    /// comes first ascending and last descending.
    #[must_use]
    pub fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        let ascending = match self.field {
            SortField::AverageRating => compare_numbers(a.average_rating, b.average_rating),
            SortField::Title => a.title.as_deref().cmp(&b.title.as_deref()),
            SortField::ReleaseDate => a.release_date.cmp(&b.release_date),
            SortField::Runtime => compare_numbers(a.runtime, b.runtime),
        };
        match self.direction {
            SortDirection::Ascending => ascending,
            SortDirection::Descending => ascending.reverse(),
        }
    }
}

fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}
