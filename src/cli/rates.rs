use super::ui;
use crate::core::{RateProvider, RateTable};
use anyhow::{Context, Result};
use comfy_table::Cell;
use std::collections::BTreeMap;

pub async fn run(provider: &dyn RateProvider, base: &str) -> Result<()> {
    let pb = ui::new_spinner("Loading currencies...");
    let currencies = provider
        .currencies()
        .await
        .context("Failed to load currencies")?;
    pb.finish_and_clear();

    let pb = ui::new_spinner(&format!("Fetching exchange rates (base: {base})..."));
    let rates = provider
        .latest_rates(base, None)
        .await
        .context("Failed to load exchange rates")?;
    pb.finish_and_clear();

    let rate_table = RateTable::new(base, rates);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Code"),
        ui::header_cell(&format!("Rate (1 {base} =)")),
        ui::header_cell("Inverse"),
    ]);

    // BTreeMap for a stable, code-sorted listing.
    let sorted: BTreeMap<&String, &f64> = rate_table.rates().iter().collect();
    for (code, rate) in sorted {
        let name = currencies
            .get(code.as_str())
            .map_or(code.as_str(), |c| c.name.as_str());
        let inverse = if *rate != 0.0 { 1.0 / rate } else { 0.0 };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(code),
            ui::number_cell(&ui::format_rate(*rate)),
            ui::number_cell(&ui::format_rate(inverse)),
        ]);
    }

    println!("{table}");
    println!(
        "{}",
        ui::style_text(
            &format!("{} exchange rates | Base: {base}", rate_table.len()),
            ui::StyleType::Subtle
        )
    );

    Ok(())
}
