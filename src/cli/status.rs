use super::ui;
use crate::core::RateProvider;
use anyhow::{Context, Result};

pub async fn run(provider: &dyn RateProvider) -> Result<()> {
    let pb = ui::new_spinner("Checking API status...");
    let status = provider.status().await.context("Failed to query API status")?;
    pb.finish_and_clear();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Quota"),
        ui::header_cell("Total"),
        ui::header_cell("Used"),
        ui::header_cell("Remaining"),
    ]);
    table.add_row(vec![
        comfy_table::Cell::new("Month"),
        ui::number_cell(&status.total.to_string()),
        ui::number_cell(&status.used.to_string()),
        ui::number_cell(&status.remaining.to_string()),
    ]);

    println!("{table}");
    Ok(())
}
