//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod history;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::RateTable;
pub use currency::Currency;
pub use error::{ConvertError, RateSourceError};
pub use history::{ConversionRecord, HistoryLog};
pub use rates::{QuotaStatus, RateProvider};
