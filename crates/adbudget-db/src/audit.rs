//! Aggregate-duplication audit.
//!
//! Spend totals are stored on both campaign and brand rows so reads never
//! aggregate. The invariant is that each brand's counters equal the sum of
//! its campaigns' counters; this module reports every brand where they
//! diverge.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A brand whose stored counters disagree with the sum of its campaigns.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AggregateMismatchRow {
    pub brand_id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub current_daily_spend: Decimal,
    pub derived_daily_spend: Decimal,
    pub current_monthly_spend: Decimal,
    pub derived_monthly_spend: Decimal,
}

/// Returns every brand violating the aggregate invariant.
///
/// Brands without campaigns compare against zero. An empty result means the
/// ledger is internally consistent.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_aggregate_mismatches(
    pool: &PgPool,
) -> Result<Vec<AggregateMismatchRow>, DbError> {
    let rows = sqlx::query_as::<_, AggregateMismatchRow>(
        "SELECT b.id AS brand_id, b.public_id, b.name, \
                b.current_daily_spend, \
                COALESCE(SUM(c.total_spend_today), 0) AS derived_daily_spend, \
                b.current_monthly_spend, \
                COALESCE(SUM(c.total_spend_month), 0) AS derived_monthly_spend \
         FROM brands b \
         LEFT JOIN campaigns c ON c.brand_id = b.id \
         GROUP BY b.id, b.public_id, b.name, b.current_daily_spend, b.current_monthly_spend \
         HAVING b.current_daily_spend <> COALESCE(SUM(c.total_spend_today), 0) \
             OR b.current_monthly_spend <> COALESCE(SUM(c.total_spend_month), 0) \
         ORDER BY b.name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
