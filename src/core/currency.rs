//! Currency metadata as reported by the rate API.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

impl Currency {
    /// Builds a currency, falling back to the code when the API omits the
    /// name or symbol.
    pub fn new(code: &str, name: Option<String>, symbol: Option<String>) -> Self {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| code.to_string());
        let symbol = symbol
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| code.to_string());
        Currency {
            code: code.to_string(),
            name,
            symbol,
        }
    }

    /// Long display form, e.g. `USD ($) - US Dollar`.
    pub fn display_name(&self) -> String {
        format!("{} ({}) - {}", self.code, self.symbol, self.name)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        let usd = Currency::new("USD", Some("US Dollar".into()), Some("$".into()));
        assert_eq!(usd.to_string(), "USD - US Dollar");
        assert_eq!(usd.display_name(), "USD ($) - US Dollar");
    }

    #[test]
    fn test_missing_metadata_falls_back_to_code() {
        let xdr = Currency::new("XDR", None, None);
        assert_eq!(xdr.name, "XDR");
        assert_eq!(xdr.symbol, "XDR");

        let empty = Currency::new("BTC", Some(String::new()), Some(String::new()));
        assert_eq!(empty.name, "BTC");
        assert_eq!(empty.symbol, "BTC");
    }
}
