//! Rate provider backed by the FreeCurrencyAPI v1 HTTP endpoints.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::Currency;
use crate::core::error::RateSourceError;
use crate::core::rates::{QuotaStatus, RateProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct FreeCurrencyApi {
    base_url: String,
    client: reqwest::Client,
}

impl FreeCurrencyApi {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key).context("API key is not a valid header value")?;
        key_value.set_sensitive(true);
        headers.insert("apikey", key_value);

        let client = reqwest::Client::builder()
            .user_agent("fxr/0.2")
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(FreeCurrencyApi {
            base_url: base_url.to_string(),
            client,
        })
    }

    /// Issues one GET and maps the outcome onto the failure taxonomy:
    /// transport errors, 429, other non-200, and unparseable 200 bodies are
    /// all reported distinctly. No retries.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, RateSourceError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(RateSourceError::Transport)?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(RateSourceError::RateLimited);
        }
        if !status.is_success() {
            return Err(RateSourceError::Server {
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(RateSourceError::Transport)?;
        serde_json::from_str(&text).map_err(|e| RateSourceError::MalformedResponse {
            reason: e.to_string(),
        })
    }
}

fn rate_query(base: &str, targets: Option<&[String]>) -> Vec<(&'static str, String)> {
    let mut query = vec![("base_currency", base.to_string())];
    if let Some(targets) = targets {
        if !targets.is_empty() {
            query.push(("currencies", targets.join(",")));
        }
    }
    query
}

#[derive(Deserialize, Debug)]
struct RatesResponse {
    data: HashMap<String, f64>,
}

#[derive(Deserialize, Debug)]
struct CurrenciesResponse {
    data: HashMap<String, CurrencyInfo>,
}

#[derive(Deserialize, Debug)]
struct CurrencyInfo {
    name: Option<String>,
    symbol: Option<String>,
}

#[derive(Deserialize, Debug)]
struct StatusResponse {
    quotas: Quotas,
}

#[derive(Deserialize, Debug)]
struct Quotas {
    month: QuotaWindow,
}

#[derive(Deserialize, Debug)]
struct QuotaWindow {
    total: u64,
    used: u64,
    remaining: u64,
}

#[async_trait]
impl RateProvider for FreeCurrencyApi {
    #[instrument(name = "LatestRates", skip(self, targets), fields(base = %base))]
    async fn latest_rates(
        &self,
        base: &str,
        targets: Option<&[String]>,
    ) -> Result<HashMap<String, f64>, RateSourceError> {
        let query = rate_query(base, targets);
        let response: RatesResponse = self.get_json("/latest", &query).await?;
        Ok(response.data)
    }

    #[instrument(name = "HistoricalRates", skip(self, targets), fields(base = %base, date = %date))]
    async fn historical_rates(
        &self,
        date: NaiveDate,
        base: &str,
        targets: Option<&[String]>,
    ) -> Result<HashMap<String, f64>, RateSourceError> {
        let mut query = rate_query(base, targets);
        query.push(("date", date.format("%Y-%m-%d").to_string()));
        let response: RatesResponse = self.get_json("/historical", &query).await?;
        Ok(response.data)
    }

    async fn currencies(&self) -> Result<HashMap<String, Currency>, RateSourceError> {
        let response: CurrenciesResponse = self.get_json("/currencies", &[]).await?;
        let currencies = response
            .data
            .into_iter()
            .map(|(code, info)| {
                let currency = Currency::new(&code, info.name, info.symbol);
                (code, currency)
            })
            .collect();
        Ok(currencies)
    }

    async fn status(&self) -> Result<QuotaStatus, RateSourceError> {
        let response: StatusResponse = self.get_json("/status", &[]).await?;
        Ok(QuotaStatus {
            total: response.quotas.month.total,
            used: response.quotas.month.used,
            remaining: response.quotas.month.remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn test_provider(mock_server: &MockServer) -> FreeCurrencyApi {
        FreeCurrencyApi::new(&mock_server.uri(), "test_key").unwrap()
    }

    #[tokio::test]
    async fn test_latest_rates_success() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "data": {
                "EUR": 0.9,
                "GBP": 0.8,
                "JPY": 151.25
            }
        }"#;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base_currency", "USD"))
            .and(header("apikey", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server).await;
        let rates = provider.latest_rates("USD", None).await.unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates["EUR"], 0.9);
        assert_eq!(rates["JPY"], 151.25);
    }

    #[tokio::test]
    async fn test_latest_rates_sends_target_filter() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{"data": {"EUR": 0.9}}"#;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base_currency", "USD"))
            .and(query_param("currencies", "EUR,GBP"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server).await;
        let targets = vec!["EUR".to_string(), "GBP".to_string()];
        let rates = provider.latest_rates("USD", Some(&targets)).await.unwrap();
        assert_eq!(rates["EUR"], 0.9);
    }

    #[tokio::test]
    async fn test_historical_rates_sends_date() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{"data": {"EUR": 0.85}}"#;

        Mock::given(method("GET"))
            .and(path("/historical"))
            .and(query_param("base_currency", "USD"))
            .and(query_param("date", "2024-03-15"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server).await;
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let rates = provider.historical_rates(date, "USD", None).await.unwrap();
        assert_eq!(rates["EUR"], 0.85);
    }

    #[tokio::test]
    async fn test_currencies_metadata() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "data": {
                "USD": {"name": "US Dollar", "symbol": "$"},
                "XDR": {}
            }
        }"#;

        Mock::given(method("GET"))
            .and(path("/currencies"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server).await;
        let currencies = provider.currencies().await.unwrap();
        assert_eq!(currencies["USD"].name, "US Dollar");
        assert_eq!(currencies["USD"].symbol, "$");
        // Missing metadata falls back to the code.
        assert_eq!(currencies["XDR"].name, "XDR");
        assert_eq!(currencies["XDR"].symbol, "XDR");
    }

    #[tokio::test]
    async fn test_status_quota() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "account_id": 12345,
            "quotas": {
                "month": {"total": 5000, "used": 15, "remaining": 4985}
            }
        }"#;

        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server).await;
        let status = provider.status().await.unwrap();
        assert_eq!(
            status,
            QuotaStatus {
                total: 5000,
                used: 15,
                remaining: 4985
            }
        );
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_typed_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server).await;
        let err = provider.latest_rates("USD", None).await.unwrap_err();
        assert!(matches!(err, RateSourceError::RateLimited));
    }

    #[tokio::test]
    async fn test_server_error_carries_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server).await;
        let err = provider.latest_rates("USD", None).await.unwrap_err();
        assert!(matches!(err, RateSourceError::Server { status: 500 }));
        assert_eq!(err.to_string(), "API returned HTTP 500");
    }

    #[tokio::test]
    async fn test_missing_data_field_is_malformed() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{"rates": {"EUR": 0.9}}"#;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server).await;
        let err = provider.latest_rates("USD", None).await.unwrap_err();
        assert!(matches!(err, RateSourceError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/currencies"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let provider = test_provider(&mock_server).await;
        let err = provider.currencies().await.unwrap_err();
        assert!(matches!(err, RateSourceError::MalformedResponse { .. }));
    }
}
