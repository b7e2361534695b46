//! Command handlers for the CLI.
//!
//! These are called from `main` after the database pool and config are
//! established. `seed` and `spend` write; the remaining subcommands are
//! read-only queries.

use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Run pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub(crate) async fn run_migrate(pool: &PgPool) -> anyhow::Result<()> {
    adbudget_db::run_migrations(pool).await?;
    println!("migrations up to date");
    Ok(())
}

/// Load the seed file, validate it, and upsert its brands and campaigns.
///
/// # Errors
///
/// Returns an error if the file is unreadable or invalid, or the upsert
/// transaction fails.
pub(crate) async fn run_seed(pool: &PgPool, path: &Path) -> anyhow::Result<()> {
    let file = adbudget_core::load_campaigns(path)
        .with_context(|| format!("loading seed file {}", path.display()))?;

    let count = adbudget_db::seed_brands(pool, &file.brands).await?;
    println!(
        "seeded {count} campaigns across {} brands",
        file.brands.len()
    );
    Ok(())
}

/// Record one spend event against a campaign.
///
/// # Errors
///
/// Returns an error if the amount does not parse, the campaign does not
/// exist, or the transaction fails.
pub(crate) async fn run_spend(pool: &PgPool, campaign: Uuid, amount: &str) -> anyhow::Result<()> {
    let amount: Decimal = amount
        .parse()
        .with_context(|| format!("'{amount}' is not a valid amount"))?;

    let log = adbudget_db::record_spend(pool, campaign, amount)
        .await
        .with_context(|| format!("recording spend for campaign {campaign}"))?;

    println!(
        "recorded {} against campaign {} at {}",
        log.amount, campaign, log.created_at
    );
    Ok(())
}

/// Print brands with budgets and current aggregate spend.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_brands(pool: &PgPool) -> anyhow::Result<()> {
    let brands = adbudget_db::list_brands(pool).await?;

    if brands.is_empty() {
        println!("no brands found; run `seed` first");
        return Ok(());
    }

    println!(
        "{:<24}{:>14}{:>14}{:>14}{:>14}",
        "BRAND", "DAILY BUDGET", "DAILY SPEND", "MONTH BUDGET", "MONTH SPEND"
    );
    for brand in &brands {
        println!(
            "{:<24}{:>14}{:>14}{:>14}{:>14}",
            brand.name,
            brand.daily_budget,
            brand.current_daily_spend,
            brand.monthly_budget,
            brand.current_monthly_spend
        );
    }

    Ok(())
}

/// Print campaigns with spend figures and daypart windows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_campaigns(pool: &PgPool, active: Option<bool>) -> anyhow::Result<()> {
    let campaigns = adbudget_db::list_campaigns(pool, active, None).await?;

    if campaigns.is_empty() {
        println!("no campaigns found");
        return Ok(());
    }

    println!(
        "{:<38}{:<24}{:<8}{:>12}{:>12}  WINDOW",
        "PUBLIC ID", "CAMPAIGN", "ACTIVE", "TODAY", "MONTH"
    );
    for campaign in &campaigns {
        println!(
            "{:<38}{:<24}{:<8}{:>12}{:>12}  {:02}-{:02}",
            campaign.public_id,
            campaign.name,
            campaign.is_active,
            campaign.total_spend_today,
            campaign.total_spend_month,
            campaign.allowed_start_hour,
            campaign.allowed_end_hour
        );
    }

    Ok(())
}

/// Report brands whose stored counters drifted from their campaigns' sums.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_audit(pool: &PgPool) -> anyhow::Result<()> {
    let mismatches = adbudget_db::list_aggregate_mismatches(pool).await?;

    if mismatches.is_empty() {
        println!("aggregates consistent: every brand matches its campaigns");
        return Ok(());
    }

    println!(
        "{:<24}{:>14}{:>14}{:>14}{:>14}",
        "BRAND", "DAILY STORED", "DAILY SUM", "MONTH STORED", "MONTH SUM"
    );
    for m in &mismatches {
        println!(
            "{:<24}{:>14}{:>14}{:>14}{:>14}",
            m.name,
            m.current_daily_spend,
            m.derived_daily_spend,
            m.current_monthly_spend,
            m.derived_monthly_spend
        );
    }

    anyhow::bail!("{} brand(s) out of sync", mismatches.len());
}
