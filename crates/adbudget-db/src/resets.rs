//! Period-boundary reset transactions.
//!
//! Both resets fire from an hourly schedule and guard on local wall-clock
//! themselves, so a late or repeated trigger outside the boundary hour is a
//! no-op. Each reset zeroes one period's aggregates and re-derives every
//! campaign's active flag before bulk-zeroing the brand counters, all inside
//! one transaction.

use chrono::{DateTime, Datelike, Local, Timelike};
use rust_decimal::Decimal;
use sqlx::PgPool;

use adbudget_core::{within_window, BudgetSnapshot};

use crate::DbError;

/// What a reset pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The wall-clock guard failed; nothing was touched.
    Skipped,
    /// The reset ran; counts of campaign and brand rows updated.
    Completed { campaigns: u64, brands: u64 },
}

#[derive(Debug, sqlx::FromRow)]
struct ResetCandidate {
    id: i64,
    total_spend_today: Decimal,
    total_spend_month: Decimal,
    allowed_start_hour: i16,
    allowed_end_hour: i16,
    daily_budget: Decimal,
    monthly_budget: Decimal,
    brand_daily_spend: Decimal,
    brand_monthly_spend: Decimal,
}

impl ResetCandidate {
    fn snapshot(&self) -> BudgetSnapshot {
        BudgetSnapshot {
            campaign_spend_today: self.total_spend_today,
            campaign_spend_month: self.total_spend_month,
            brand_daily_spend: self.brand_daily_spend,
            brand_monthly_spend: self.brand_monthly_spend,
            daily_budget: self.daily_budget,
            monthly_budget: self.monthly_budget,
        }
    }
}

async fn load_candidates(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
) -> Result<Vec<ResetCandidate>, DbError> {
    let rows = sqlx::query_as::<_, ResetCandidate>(
        "SELECT c.id, c.total_spend_today, c.total_spend_month, \
                c.allowed_start_hour, c.allowed_end_hour, \
                b.daily_budget, b.monthly_budget, \
                b.current_daily_spend AS brand_daily_spend, \
                b.current_monthly_spend AS brand_monthly_spend \
         FROM campaigns c \
         JOIN brands b ON b.id = c.brand_id \
         ORDER BY c.id",
    )
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows)
}

/// Zero every campaign's daily spend and every brand's daily counter.
///
/// No-op unless `now` is in the local hour 0. For each campaign the active
/// flag is re-derived from the daypart window at the current hour and the
/// still-current monthly figures (today's spend is treated as zero). The
/// per-campaign updates precede the bulk brand zeroing in the same
/// transaction.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; the transaction rolls
/// back and no row is changed.
pub async fn reset_daily_spends(
    pool: &PgPool,
    now: DateTime<Local>,
) -> Result<ResetOutcome, DbError> {
    if now.hour() != 0 {
        return Ok(ResetOutcome::Skipped);
    }

    let mut tx = pool.begin().await?;
    let candidates = load_candidates(&mut tx).await?;
    let campaigns = candidates.len() as u64;

    for campaign in &candidates {
        let is_active = within_window(
            now.hour(),
            campaign.allowed_start_hour,
            campaign.allowed_end_hour,
        ) && campaign.snapshot().monthly_under();

        sqlx::query(
            "UPDATE campaigns \
             SET total_spend_today = 0, is_active = $1, updated_at = NOW() \
             WHERE id = $2",
        )
        .bind(is_active)
        .bind(campaign.id)
        .execute(&mut *tx)
        .await?;
    }

    let brands = sqlx::query(
        "UPDATE brands SET current_daily_spend = 0, updated_at = NOW()",
    )
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    Ok(ResetOutcome::Completed { campaigns, brands })
}

/// Zero every campaign's monthly spend and every brand's monthly counter.
///
/// No-op unless `now` is local day 1, hour 0. Mirrors
/// [`reset_daily_spends`]: the active flag is re-derived from the window and
/// the still-current daily figures (this month's spend is treated as zero).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; the transaction rolls
/// back and no row is changed.
pub async fn reset_monthly_spends(
    pool: &PgPool,
    now: DateTime<Local>,
) -> Result<ResetOutcome, DbError> {
    if now.day() != 1 || now.hour() != 0 {
        return Ok(ResetOutcome::Skipped);
    }

    let mut tx = pool.begin().await?;
    let candidates = load_candidates(&mut tx).await?;
    let campaigns = candidates.len() as u64;

    for campaign in &candidates {
        let is_active = within_window(
            now.hour(),
            campaign.allowed_start_hour,
            campaign.allowed_end_hour,
        ) && campaign.snapshot().daily_under();

        sqlx::query(
            "UPDATE campaigns \
             SET total_spend_month = 0, is_active = $1, updated_at = NOW() \
             WHERE id = $2",
        )
        .bind(is_active)
        .bind(campaign.id)
        .execute(&mut *tx)
        .await?;
    }

    let brands = sqlx::query(
        "UPDATE brands SET current_monthly_spend = 0, updated_at = NOW()",
    )
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    Ok(ResetOutcome::Completed { campaigns, brands })
}
