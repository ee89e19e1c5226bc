use super::ui;
use crate::core::RateProvider;
use anyhow::{Context, Result};
use comfy_table::Cell;
use std::collections::BTreeMap;

pub async fn run(provider: &dyn RateProvider) -> Result<()> {
    let pb = ui::new_spinner("Loading currencies...");
    let currencies = provider
        .currencies()
        .await
        .context("Failed to load currencies")?;
    pb.finish_and_clear();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
    ]);

    let sorted: BTreeMap<_, _> = currencies.iter().collect();
    for (code, currency) in sorted {
        table.add_row(vec![
            Cell::new(code),
            Cell::new(&currency.symbol),
            Cell::new(&currency.name),
        ]);
    }

    println!("{table}");
    println!(
        "{}",
        ui::style_text(
            &format!("{} supported currencies", currencies.len()),
            ui::StyleType::Subtle
        )
    );

    Ok(())
}
