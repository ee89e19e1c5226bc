//! Rate source abstractions.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::currency::Currency;
use crate::core::error::RateSourceError;

/// Monthly request quota as reported by the API status endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaStatus {
    pub total: u64,
    pub used: u64,
    pub remaining: u64,
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Latest rates relative to `base`, optionally restricted to `targets`.
    async fn latest_rates(
        &self,
        base: &str,
        targets: Option<&[String]>,
    ) -> Result<HashMap<String, f64>, RateSourceError>;

    /// Rates for a specific date, relative to `base`.
    async fn historical_rates(
        &self,
        date: NaiveDate,
        base: &str,
        targets: Option<&[String]>,
    ) -> Result<HashMap<String, f64>, RateSourceError>;

    /// Supported-currency metadata, keyed by code.
    async fn currencies(&self) -> Result<HashMap<String, Currency>, RateSourceError>;

    /// Account quota status.
    async fn status(&self) -> Result<QuotaStatus, RateSourceError>;
}
