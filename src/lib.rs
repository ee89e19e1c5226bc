pub mod cli;
pub mod core;
pub mod providers;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::providers::freecurrency::FreeCurrencyApi;

pub enum AppCommand {
    Convert {
        amount: f64,
        from: String,
        targets: Vec<String>,
    },
    Rates {
        base: Option<String>,
    },
    Historical {
        date: NaiveDate,
        from: String,
        to: String,
    },
    Currencies,
    Status,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxr starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = %config.provider.base_url,
        base_currency = %config.base_currency,
        "Loaded config"
    );

    let api_key = config.api_key()?;
    let provider = FreeCurrencyApi::new(&config.provider.base_url, &api_key)?;

    match command {
        AppCommand::Convert {
            amount,
            from,
            targets,
        } => cli::convert::run(&provider, &config.base_currency, amount, &from, &targets).await,
        AppCommand::Rates { base } => {
            let base = base.as_deref().unwrap_or(&config.base_currency);
            cli::rates::run(&provider, base).await
        }
        AppCommand::Historical { date, from, to } => {
            cli::historical::run(&provider, date, &from, &to).await
        }
        AppCommand::Currencies => cli::currencies::run(&provider).await,
        AppCommand::Status => cli::status::run(&provider).await,
    }
}
