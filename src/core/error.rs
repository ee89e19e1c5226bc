//! Failure taxonomy for the rate source and the conversion model.

use thiserror::Error;

/// Failures a rate provider can report. No retries happen at this level; the
/// caller surfaces the error and keeps whatever state it already had.
#[derive(Debug, Error)]
pub enum RateSourceError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("rate limit exceeded (HTTP 429)")]
    RateLimited,

    #[error("API returned HTTP {status}")]
    Server { status: u16 },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

/// Errors from the conversion model itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("no exchange rate available for {code}")]
    RateUnavailable { code: String },

    #[error("exchange rate for {code} is zero")]
    ZeroRate { code: String },

    #[error("amount must be a finite number")]
    InvalidAmount,
}
