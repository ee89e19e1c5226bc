use super::ui;
use crate::core::RateProvider;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use console::style;
use tracing::debug;

const EXAMPLE_AMOUNTS: [f64; 5] = [1.0, 10.0, 100.0, 1_000.0, 10_000.0];

fn examples_table(rate: f64, from: &str, to: &str) -> comfy_table::Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&format!("Amount ({from})")),
        ui::header_cell(&format!("Value ({to})")),
    ]);
    for amount in EXAMPLE_AMOUNTS {
        table.add_row(vec![
            ui::number_cell(&ui::format_amount(amount)),
            ui::number_cell(&ui::format_amount(amount * rate)),
        ]);
    }
    table
}

fn print_comparison(historical: f64, current: f64, from: &str, to: &str) {
    // Dividing by a zero or non-finite historical rate would produce a
    // meaningless percentage; report that instead of an infinity.
    if historical == 0.0 || !historical.is_finite() {
        println!(
            "{}",
            ui::style_text(
                "Comparison with the current rate is unavailable (historical rate is zero)",
                ui::StyleType::Subtle
            )
        );
        return;
    }

    let difference = (current - historical) / historical * 100.0;
    println!(
        "\n{}",
        ui::style_text("Comparison with current rate", ui::StyleType::Title)
    );
    println!("  Historical rate: {}", ui::format_rate(historical));
    println!("  Current rate:    {}", ui::format_rate(current));

    let change = ui::format_signed_pct(difference);
    let change = if difference >= 0.0 {
        style(change).green()
    } else {
        style(change).red()
    };
    println!("  Change:          {change}");

    if difference > 0.0 {
        println!("\n  {to} has strengthened against {from}");
    } else if difference < 0.0 {
        println!("\n  {to} has weakened against {from}");
    } else {
        println!("\n  No change in exchange rate");
    }
}

pub async fn run(provider: &dyn RateProvider, date: NaiveDate, from: &str, to: &str) -> Result<()> {
    let pb = ui::new_spinner("Loading currencies...");
    let currencies = provider
        .currencies()
        .await
        .context("Failed to load currencies")?;
    pb.finish_and_clear();

    let targets = [to.to_string()];
    let pb = ui::new_spinner(&format!("Fetching historical rates for {date}..."));
    let rates = provider
        .historical_rates(date, from, Some(targets.as_slice()))
        .await
        .with_context(|| format!("Failed to fetch historical rates for {date}"))?;
    pb.finish_and_clear();

    let rate = rates
        .get(to)
        .copied()
        .ok_or_else(|| anyhow!("Rate data not available for {to} on {date}"))?;

    let describe = |code: &str| {
        currencies
            .get(code)
            .map_or_else(|| code.to_string(), |c| c.to_string())
    };

    println!(
        "{}",
        ui::style_text("Historical Exchange Rates", ui::StyleType::Title)
    );
    println!("  Date:   {date}");
    println!("  Base:   {}", describe(from));
    println!("  Target: {}", describe(to));
    println!();
    println!("  1 {from} = {} {to}", ui::format_rate(rate));
    if rate != 0.0 && rate.is_finite() {
        println!("  1 {to} = {} {from}", ui::format_rate(1.0 / rate));
    }

    println!();
    println!("{}", examples_table(rate, from, to));

    // The comparison fetches today's rate with the same base as the
    // historical one, so both operands always share a pivot currency.
    let pb = ui::new_spinner("Fetching current rate...");
    let current = provider.latest_rates(from, Some(targets.as_slice())).await;
    pb.finish_and_clear();

    match current {
        Ok(current_rates) => match current_rates.get(to) {
            Some(current) => print_comparison(rate, *current, from, to),
            None => debug!("Current rate missing for {to}, skipping comparison"),
        },
        Err(e) => {
            println!(
                "{}",
                ui::style_text(
                    &format!("Current rate unavailable, skipping comparison: {e}"),
                    ui::StyleType::Subtle
                )
            );
        }
    }

    Ok(())
}
