use crate::{DatabaseConstants, RawConstants, RawSearchConstants};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConstants {
    pub database: DatabaseConstants,
    pub search: SearchConstants,
}

/// Page size bounds for movie searches. Always `1 <= default_limit <= max_limit`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SearchConstants {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl From<RawConstants> for AppConstants {
    fn from(raw: RawConstants) -> Self {
        Self {
            database: raw.database,
            search: raw.search.into(),
        }
    }
}

impl From<RawSearchConstants> for SearchConstants {
    fn from(raw: RawSearchConstants) -> Self {
        let default_limit = raw.default_limit.max(1) as u64;
        let max_limit = raw.max_limit.max(1) as u64;
        if max_limit < default_limit {
            warn!(
                "constants.search.max_limit ({max_limit}) is below default_limit ({default_limit}), raising it."
            );
        }

        Self {
            default_limit,
            max_limit: max_limit.max(default_limit),
        }
    }
}
