//! Conversion model: an immutable rate table with base-pivot conversion.

use std::collections::HashMap;

use crate::core::error::ConvertError;

/// A snapshot of exchange rates, all relative to a single base currency.
///
/// The table is replaced wholesale on every refresh and exposes no mutation
/// API, so a conversion reading an old snapshot can never observe a partial
/// update. The base currency's rate to itself is implicitly 1.0 and does not
/// need to appear in the map.
#[derive(Debug, Clone)]
pub struct RateTable {
    base: String,
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(base: &str, rates: HashMap<String, f64>) -> Self {
        RateTable {
            base: base.to_string(),
            rates,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn rates(&self) -> &HashMap<String, f64> {
        &self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn rate_for(&self, code: &str) -> Result<f64, ConvertError> {
        let rate = self
            .rates
            .get(code)
            .copied()
            .ok_or_else(|| ConvertError::RateUnavailable {
                code: code.to_string(),
            })?;
        if rate == 0.0 || !rate.is_finite() {
            return Err(ConvertError::ZeroRate {
                code: code.to_string(),
            });
        }
        Ok(rate)
    }

    /// Converts an amount between two currencies by pivoting through the
    /// base: divide by the source rate, multiply by the target rate. All
    /// cross-rates compose through the base rather than needing a full rate
    /// matrix.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
        if !amount.is_finite() {
            return Err(ConvertError::InvalidAmount);
        }
        if from == to {
            return Ok(amount);
        }

        let mut amount = amount;
        if from != self.base {
            amount /= self.rate_for(from)?;
        }
        if to != self.base {
            amount *= self.rate_for(to)?;
        }
        Ok(amount)
    }

    /// The unit rate between two currencies, derived from `convert` so the
    /// two can never disagree.
    pub fn exchange_rate(&self, from: &str, to: &str) -> Result<f64, ConvertError> {
        self.convert(1.0, from, to)
    }
}
