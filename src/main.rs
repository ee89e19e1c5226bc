use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use fxr::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount into one or more target currencies
    Convert {
        amount: f64,
        from: String,
        #[arg(required = true)]
        to: Vec<String>,
    },
    /// Display the latest exchange rates
    Rates {
        /// Base currency for the rate table
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Look up a historical rate and compare it with today's
    Historical {
        from: String,
        to: String,
        /// Date to look up (YYYY-MM-DD); defaults to today
        #[arg(short, long, value_parser = parse_date, conflicts_with = "days_ago")]
        date: Option<NaiveDate>,
        /// Look up the rate from this many days ago
        #[arg(long)]
        days_ago: Option<i64>,
    },
    /// List supported currencies
    Currencies,
    /// Show API quota status
    Status,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

impl From<Commands> for fxr::AppCommand {
    fn from(cmd: Commands) -> fxr::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => fxr::AppCommand::Convert {
                amount,
                from: from.to_uppercase(),
                targets: to.iter().map(|t| t.to_uppercase()).collect(),
            },
            Commands::Rates { base } => fxr::AppCommand::Rates {
                base: base.map(|b| b.to_uppercase()),
            },
            Commands::Historical {
                from,
                to,
                date,
                days_ago,
            } => {
                let date = date.unwrap_or_else(|| {
                    Utc::now().date_naive() - chrono::Duration::days(days_ago.unwrap_or(0))
                });
                fxr::AppCommand::Historical {
                    date,
                    from: from.to_uppercase(),
                    to: to.to_uppercase(),
                }
            }
            Commands::Currencies => fxr::AppCommand::Currencies,
            Commands::Status => fxr::AppCommand::Status,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => fxr::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = fxr::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
# Get a free API key at https://freecurrencyapi.com/
# (or leave empty and set the FXR_API_KEY environment variable)
api_key: ""

provider:
  base_url: "https://api.freecurrencyapi.com/v1"

base_currency: "USD"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
