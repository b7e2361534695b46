mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "adbudget-cli")]
#[command(about = "Ad budget ledger command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run pending database migrations
    Migrate,
    /// Upsert brands and campaigns from the seed YAML file
    Seed {
        /// Path to the seed file (defaults to ADBUDGET_CAMPAIGNS_PATH)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Record a spend event against a campaign
    Spend {
        /// Campaign public id
        #[arg(long)]
        campaign: Uuid,
        /// Amount to record (e.g. 12.50)
        #[arg(long)]
        amount: String,
    },
    /// List brands with budgets and current spend
    Brands,
    /// List campaigns with spend figures and daypart windows
    Campaigns {
        /// Only show campaigns with this active state
        #[arg(long)]
        active: Option<bool>,
    },
    /// Check that brand spend counters match their campaigns
    Audit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = adbudget_core::load_app_config()?;
    let pool_config = adbudget_db::PoolConfig::from_app_config(&config);
    let pool = adbudget_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Migrate => commands::run_migrate(&pool).await,
        Commands::Seed { file } => {
            let path = file.unwrap_or(config.campaigns_path);
            commands::run_seed(&pool, &path).await
        }
        Commands::Spend { campaign, amount } => {
            commands::run_spend(&pool, campaign, &amount).await
        }
        Commands::Brands => commands::run_brands(&pool).await,
        Commands::Campaigns { active } => commands::run_campaigns(&pool, active).await,
        Commands::Audit => commands::run_audit(&pool).await,
    }
}
