use app_state::SearchConstants;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 50;
pub const MAX_LIMIT: u64 = 500;

/// Bounds applied to the `page`/`limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl From<SearchConstants> for PageLimits {
    fn from(constants: SearchConstants) -> Self {
        Self {
            default_limit: constants.default_limit,
            max_limit: constants.max_limit,
        }
    }
}

impl PageLimits {
    /// A parsed page number below 1 is clamped to 1; a missing one becomes 1.
    #[must_use]
    pub fn page(self, requested: Option<i64>) -> u64 {
        requested.map_or(DEFAULT_PAGE, |page| page.max(1) as u64)
    }

    /// A parsed limit is clamped into `1..=max_limit`; a missing one becomes `default_limit`.
    #[must_use]
    pub fn limit(self, requested: Option<i64>) -> u64 {
        requested
            .map_or(self.default_limit, |limit| limit.max(1) as u64)
            .min(self.max_limit)
    }
}

/// The contiguous slice of the sorted, filtered result set that makes up one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
}

impl PageWindow {
    #[must_use]
    pub const fn new(page: u64, limit: u64) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(limit),
            limit,
        }
    }
}

#[must_use]
pub const fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}
