use anyhow::Result;
use clap::{Parser, Subcommand};
use dinnerplan::pipeline::{parse_week_of, today};
use time::Date;

mod cli;

/// dinnerplan - Weekly dinner plans and grocery lists by email
#[derive(Parser)]
#[command(name = "dinnerplan")]
#[command(about = "Turn a weekly dinner plan into a grocery list and email", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the weekly plan email and send it
    Send {
        /// Plan JSON file, or "-" to read from stdin
        #[arg(long)]
        plan: String,

        /// Date for the week (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_week_of)]
        week_of: Option<Date>,

        /// Print the email to the console instead of sending it
        #[arg(long, visible_alias = "no-email")]
        dry_run: bool,
    },
    /// Print the aggregated grocery list for a plan
    Grocery {
        /// Plan JSON file, or "-" to read from stdin
        #[arg(long)]
        plan: String,

        /// Date for the week (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_week_of)]
        week_of: Option<Date>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = dinnerplan::Config::load(cli.config.clone())?;
    config.validate()?;

    // Initialize observability (tracing + logging)
    dinnerplan::observability::init_observability(
        "dinnerplan",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Send {
            plan,
            week_of,
            dry_run,
        } => cli::send::send(config, plan, week_of.unwrap_or_else(today), dry_run).await,
        Commands::Grocery { plan, week_of } => {
            cli::grocery::grocery(config, plan, week_of.unwrap_or_else(today))
        }
    }
}
