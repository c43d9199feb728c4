//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A limit/offset request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// The maximum number of items to return (always > 0).
    limit: u64,
    /// The number of items to skip.
    offset: u64,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_LIMIT: u64 = 10;
    /// The default offset.
    pub const DEFAULT_OFFSET: u64 = 0;

    /// Creates a new page request.
    ///
    /// A zero limit falls back to [`Self::DEFAULT_LIMIT`].
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        let limit = if limit == 0 { Self::DEFAULT_LIMIT } else { limit };
        Self { limit, offset }
    }

    /// Builds a page request from raw query parameters.
    ///
    /// Missing, unparseable or non-positive limits become 10; missing,
    /// unparseable or negative offsets become 0.
    #[must_use]
    pub fn from_raw(limit: Option<&str>, offset: Option<&str>) -> Self {
        let limit = limit
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|value| *value > 0)
            .and_then(|value| u64::try_from(value).ok())
            .unwrap_or(Self::DEFAULT_LIMIT);

        let offset = offset
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|value| *value >= 0)
            .and_then(|value| u64::try_from(value).ok())
            .unwrap_or(Self::DEFAULT_OFFSET);

        Self::new(limit, offset)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, Self::DEFAULT_OFFSET)
    }
}
