//! The append-only spend journal and the atomic spend recorder.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `spend_logs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SpendLogRow {
    pub id: i64,
    pub public_id: Uuid,
    pub campaign_id: i64,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Records one spend event for a campaign.
///
/// Inside a single transaction: bumps the campaign's daily and monthly
/// totals, bumps the owning brand's daily and monthly totals, and appends
/// the journal row. If any statement fails the transaction rolls back and
/// none of the three writes are visible.
///
/// The amount is taken as-is; no sign or magnitude validation happens here.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the campaign does not exist, or
/// [`DbError::Sqlx`] if any statement fails.
pub async fn record_spend(
    pool: &PgPool,
    campaign_public_id: Uuid,
    amount: Decimal,
) -> Result<SpendLogRow, DbError> {
    let mut tx = pool.begin().await?;

    let campaign: Option<(i64, i64)> = sqlx::query_as(
        "SELECT id, brand_id FROM campaigns WHERE public_id = $1",
    )
    .bind(campaign_public_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((campaign_id, brand_id)) = campaign else {
        return Err(DbError::NotFound);
    };

    sqlx::query(
        "UPDATE campaigns \
         SET total_spend_today = total_spend_today + $1, \
             total_spend_month = total_spend_month + $1, \
             updated_at = NOW() \
         WHERE id = $2",
    )
    .bind(amount)
    .bind(campaign_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE brands \
         SET current_daily_spend = current_daily_spend + $1, \
             current_monthly_spend = current_monthly_spend + $1, \
             updated_at = NOW() \
         WHERE id = $2",
    )
    .bind(amount)
    .bind(brand_id)
    .execute(&mut *tx)
    .await?;

    let row = sqlx::query_as::<_, SpendLogRow>(
        "INSERT INTO spend_logs (campaign_id, amount) \
         VALUES ($1, $2) \
         RETURNING id, public_id, campaign_id, amount, created_at",
    )
    .bind(campaign_id)
    .bind(amount)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

/// Returns the most recent spend entries, optionally for one campaign.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_spend_logs(
    pool: &PgPool,
    campaign_public_id: Option<Uuid>,
    limit: i64,
) -> Result<Vec<SpendLogRow>, DbError> {
    let rows = sqlx::query_as::<_, SpendLogRow>(
        "SELECT s.id, s.public_id, s.campaign_id, s.amount, s.created_at \
         FROM spend_logs s \
         JOIN campaigns c ON c.id = s.campaign_id \
         WHERE ($1::UUID IS NULL OR c.public_id = $1) \
         ORDER BY s.created_at DESC, s.id DESC \
         LIMIT $2",
    )
    .bind(campaign_public_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
