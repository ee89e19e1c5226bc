use super::ui;
use crate::core::history::{ConversionRecord, HistoryLog};
use crate::core::{Currency, RateProvider, RateTable};
use anyhow::{Context, Result, bail};
use comfy_table::Cell;
use std::collections::HashMap;

fn symbol_for<'a>(currencies: &'a HashMap<String, Currency>, code: &'a str) -> &'a str {
    currencies.get(code).map_or(code, |c| c.symbol.as_str())
}

fn history_table(history: &HistoryLog) -> comfy_table::Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Time (UTC)"),
        ui::header_cell("Conversion"),
        ui::header_cell("Rate"),
    ]);
    for record in history.iter() {
        table.add_row(vec![
            Cell::new(record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::new(format!(
                "{} {} -> {} {}",
                ui::format_amount(record.amount),
                record.from,
                ui::format_amount(record.result),
                record.to
            )),
            ui::number_cell(&ui::format_rate(record.rate)),
        ]);
    }
    table
}

pub async fn run(
    provider: &dyn RateProvider,
    base_currency: &str,
    amount: f64,
    from: &str,
    targets: &[String],
) -> Result<()> {
    let pb = ui::new_spinner("Loading currencies...");
    let currencies = provider
        .currencies()
        .await
        .context("Failed to load currencies")?;
    pb.finish_and_clear();

    let pb = ui::new_spinner(&format!("Fetching exchange rates (base: {base_currency})..."));
    let rates = provider
        .latest_rates(base_currency, None)
        .await
        .context("Failed to load exchange rates")?;
    pb.finish_and_clear();

    // A fresh table per invocation, replaced wholesale; earlier results never
    // see a partial refresh.
    let table = RateTable::new(base_currency, rates);
    let mut history = HistoryLog::new();

    for to in targets {
        match table.convert(amount, from, to) {
            Ok(result) => {
                let rate = table.exchange_rate(from, to)?;
                println!(
                    "{}",
                    ui::style_text(
                        &format!(
                            "{} {} = {} {}",
                            symbol_for(&currencies, from),
                            ui::format_amount(amount),
                            symbol_for(&currencies, to),
                            ui::format_amount(result)
                        ),
                        ui::StyleType::Result
                    )
                );
                println!(
                    "{}",
                    ui::style_text(
                        &format!("1 {from} = {} {to}", ui::format_rate(rate)),
                        ui::StyleType::Subtle
                    )
                );
                history.push(ConversionRecord::new(amount, from, result, to, rate));
            }
            Err(e) => {
                println!(
                    "{}",
                    ui::style_text(&format!("{to}: {e}"), ui::StyleType::Error)
                );
            }
        }
    }

    if history.is_empty() {
        bail!("No conversion succeeded");
    }

    if history.len() > 1 {
        println!(
            "\n{}",
            ui::style_text("Session history", ui::StyleType::Title)
        );
        println!("{}", history_table(&history));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RateSourceError;
    use crate::core::rates::QuotaStatus;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct StubProvider {
        rates: HashMap<String, f64>,
    }

    #[async_trait]
    impl RateProvider for StubProvider {
        async fn latest_rates(
            &self,
            _base: &str,
            _targets: Option<&[String]>,
        ) -> Result<HashMap<String, f64>, RateSourceError> {
            Ok(self.rates.clone())
        }

        async fn historical_rates(
            &self,
            _date: NaiveDate,
            _base: &str,
            _targets: Option<&[String]>,
        ) -> Result<HashMap<String, f64>, RateSourceError> {
            Ok(self.rates.clone())
        }

        async fn currencies(&self) -> Result<HashMap<String, Currency>, RateSourceError> {
            Ok(HashMap::from([(
                "USD".to_string(),
                Currency::new("USD", Some("US Dollar".into()), Some("$".into())),
            )]))
        }

        async fn status(&self) -> Result<QuotaStatus, RateSourceError> {
            Ok(QuotaStatus {
                total: 0,
                used: 0,
                remaining: 0,
            })
        }
    }

    fn stub() -> StubProvider {
        StubProvider {
            rates: HashMap::from([("EUR".to_string(), 0.9), ("GBP".to_string(), 0.8)]),
        }
    }

    #[tokio::test]
    async fn test_convert_to_known_targets() {
        let provider = stub();
        let targets = vec!["EUR".to_string(), "GBP".to_string()];
        let result = run(&provider, "USD", 100.0, "USD", &targets).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_target_alone_fails() {
        let provider = stub();
        let targets = vec!["XXX".to_string()];
        let result = run(&provider, "USD", 100.0, "USD", &targets).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "No conversion succeeded");
    }

    #[tokio::test]
    async fn test_one_bad_target_does_not_sink_the_rest() {
        let provider = stub();
        let targets = vec!["XXX".to_string(), "EUR".to_string()];
        let result = run(&provider, "USD", 100.0, "USD", &targets).await;
        assert!(result.is_ok());
    }
}
