//! In-memory log of successful conversions.

use std::fmt;

use chrono::{DateTime, Utc};

/// One completed conversion. Records are immutable once appended.
#[derive(Debug, Clone)]
pub struct ConversionRecord {
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub from: String,
    pub result: f64,
    pub to: String,
    pub rate: f64,
}

impl ConversionRecord {
    pub fn new(amount: f64, from: &str, result: f64, to: &str, rate: f64) -> Self {
        ConversionRecord {
            timestamp: Utc::now(),
            amount,
            from: from.to_string(),
            result,
            to: to.to_string(),
            rate,
        }
    }
}

impl fmt::Display for ConversionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:.2} {} -> {:.2} {} (rate: {:.6})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.amount,
            self.from,
            self.result,
            self.to,
            self.rate
        )
    }
}

/// Append-only conversion history. Entries are only ever removed wholesale
/// through `clear`.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Vec<ConversionRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ConversionRecord) {
        self.records.push(record);
    }

    /// Iterates records most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.records.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let log = HistoryLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert_eq!(log.iter().count(), 0);
    }

    #[test]
    fn test_records_are_most_recent_first() {
        let mut log = HistoryLog::new();
        log.push(ConversionRecord::new(100.0, "USD", 90.0, "EUR", 0.9));
        log.push(ConversionRecord::new(50.0, "USD", 40.0, "GBP", 0.8));
        log.push(ConversionRecord::new(10.0, "EUR", 8.88, "GBP", 0.888));

        assert_eq!(log.len(), 3);
        let targets: Vec<&str> = log.iter().map(|r| r.to.as_str()).collect();
        assert_eq!(targets, vec!["GBP", "GBP", "EUR"]);
        assert_eq!(log.iter().next().unwrap().amount, 10.0);
    }

    #[test]
    fn test_clear_is_wholesale() {
        let mut log = HistoryLog::new();
        log.push(ConversionRecord::new(1.0, "USD", 0.9, "EUR", 0.9));
        log.push(ConversionRecord::new(2.0, "USD", 1.8, "EUR", 0.9));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_record_display() {
        let record = ConversionRecord::new(1234.5, "USD", 1111.05, "EUR", 0.9);
        let text = record.to_string();
        assert!(text.contains("1234.50 USD -> 1111.05 EUR"));
        assert!(text.contains("(rate: 0.900000)"));
    }
}
