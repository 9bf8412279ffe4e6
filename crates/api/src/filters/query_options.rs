//! Pagination, historical and ranking options.

use rust_decimal::Decimal;

use crate::error::{ApiError, Result};
use crate::types::apy::ApyInterval;

/// Default page size used by the listing endpoints.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// One page of a paged endpoint. Pages are numbered from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// The following page with the same size.
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            per_page: self.per_page,
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("perPage", self.per_page.to_string()),
        ]
    }
}

/// A page of results together with the next page number the remote advertised.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page: Option<u32>,
}

/// Options for the historical APY endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoricalQuery {
    pub page: PageRequest,
    pub apy_interval: ApyInterval,
    /// Unix seconds, inclusive.
    pub from_timestamp: Option<u64>,
    /// Unix seconds, inclusive.
    pub to_timestamp: Option<u64>,
}

impl HistoricalQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    pub fn apy_interval(mut self, interval: ApyInterval) -> Self {
        self.apy_interval = interval;
        self
    }

    pub fn from_timestamp(mut self, ts: u64) -> Self {
        self.from_timestamp = Some(ts);
        self
    }

    pub fn to_timestamp(mut self, ts: u64) -> Self {
        self.to_timestamp = Some(ts);
        self
    }

    /// Samples from the `days` days before `now`.
    pub fn last_days(now: u64, days: u64) -> Self {
        Self::new().from_timestamp(now.saturating_sub(days.saturating_mul(86_400)))
    }

    /// Check the time window.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidRange`] when `from_timestamp > to_timestamp`.
    pub fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from_timestamp, self.to_timestamp) {
            if from > to {
                return Err(ApiError::InvalidRange {
                    min: Decimal::from(from),
                    max: Decimal::from(to),
                });
            }
        }
        Ok(())
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.page.to_query();
        query.push(("apyInterval", self.apy_interval.to_string()));
        if let Some(from) = self.from_timestamp {
            query.push(("fromTimestamp", from.to_string()));
        }
        if let Some(to) = self.to_timestamp {
            query.push(("toTimestamp", to.to_string()));
        }
        query
    }
}

/// Ranking options for the best-deposit-options endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RankingOptions {
    pub apy_interval: ApyInterval,
    /// Minimum total APY as a fraction (`0.03` is 3%).
    pub min_apy: Option<Decimal>,
}

impl RankingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apy_interval(mut self, interval: ApyInterval) -> Self {
        self.apy_interval = interval;
        self
    }

    pub fn min_apy(mut self, min_apy: Decimal) -> Self {
        self.min_apy = Some(min_apy);
        self
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("apyInterval", self.apy_interval.to_string())];
        if let Some(min) = self.min_apy {
            query.push(("minApy", min.normalize().to_string()));
        }
        query
    }
}
