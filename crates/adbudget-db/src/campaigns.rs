//! Database operations for the `campaigns` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use adbudget_core::BudgetSnapshot;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `campaigns` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CampaignRow {
    pub id: i64,
    pub public_id: Uuid,
    pub brand_id: i64,
    pub name: String,
    pub is_active: bool,
    pub total_spend_today: Decimal,
    pub total_spend_month: Decimal,
    pub allowed_start_hour: i16,
    pub allowed_end_hour: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A campaign joined with its brand's budgets and aggregate spend.
///
/// The pause/resume jobs read campaigns through this view so each decision
/// has every figure it needs without a second round-trip per row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CampaignBudgetRow {
    pub id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub total_spend_today: Decimal,
    pub total_spend_month: Decimal,
    pub allowed_start_hour: i16,
    pub allowed_end_hour: i16,
    pub brand_name: String,
    pub daily_budget: Decimal,
    pub monthly_budget: Decimal,
    pub brand_daily_spend: Decimal,
    pub brand_monthly_spend: Decimal,
}

impl CampaignBudgetRow {
    /// The campaign's spend figures and budgets as a decision snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BudgetSnapshot {
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

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns campaigns, optionally filtered by active flag and/or brand.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_campaigns(
    pool: &PgPool,
    is_active: Option<bool>,
    brand_public_id: Option<Uuid>,
) -> Result<Vec<CampaignRow>, DbError> {
    let rows = sqlx::query_as::<_, CampaignRow>(
        "SELECT c.id, c.public_id, c.brand_id, c.name, c.is_active, \
                c.total_spend_today, c.total_spend_month, \
                c.allowed_start_hour, c.allowed_end_hour, c.created_at, c.updated_at \
         FROM campaigns c \
         JOIN brands b ON b.id = c.brand_id \
         WHERE ($1::BOOL IS NULL OR c.is_active = $1) \
           AND ($2::UUID IS NULL OR b.public_id = $2) \
         ORDER BY c.name",
    )
    .bind(is_active)
    .bind(brand_public_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns every campaign joined with its brand's budgets and spend.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_campaigns_with_budgets(pool: &PgPool) -> Result<Vec<CampaignBudgetRow>, DbError> {
    let rows = sqlx::query_as::<_, CampaignBudgetRow>(
        "SELECT c.id, c.public_id, c.name, c.is_active, \
                c.total_spend_today, c.total_spend_month, \
                c.allowed_start_hour, c.allowed_end_hour, \
                b.name AS brand_name, b.daily_budget, b.monthly_budget, \
                b.current_daily_spend AS brand_daily_spend, \
                b.current_monthly_spend AS brand_monthly_spend \
         FROM campaigns c \
         JOIN brands b ON b.id = c.brand_id \
         ORDER BY c.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single campaign by public id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_campaign_by_public_id(
    pool: &PgPool,
    public_id: Uuid,
) -> Result<Option<CampaignRow>, DbError> {
    let row = sqlx::query_as::<_, CampaignRow>(
        "SELECT id, public_id, brand_id, name, is_active, \
                total_spend_today, total_spend_month, \
                allowed_start_hour, allowed_end_hour, created_at, updated_at \
         FROM campaigns \
         WHERE public_id = $1",
    )
    .bind(public_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Flips a single campaign's `is_active` flag.
///
/// One row per call; the pause/resume jobs deliberately write each affected
/// campaign individually rather than batching.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn set_campaign_active(
    pool: &PgPool,
    campaign_id: i64,
    is_active: bool,
) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE campaigns \
         SET is_active = $1, updated_at = NOW() \
         WHERE id = $2",
    )
    .bind(is_active)
    .bind(campaign_id)
    .execute(pool)
    .await?;
    Ok(())
}
