use adbudget_core::BrandSeed;
use sqlx::PgPool;

use crate::DbError;

/// Upsert brands and their campaigns from config into the database.
///
/// Returns the number of campaigns processed. All upserts run inside a
/// single transaction; if any operation fails the entire batch is rolled
/// back. Budgets and daypart windows are overwritten from config; spend
/// counters and active flags on existing rows are left alone so a re-seed
/// does not clobber live bookkeeping.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_brands(pool: &PgPool, brands: &[BrandSeed]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for brand in brands {
        let brand_id: i64 = sqlx::query_scalar(
            "INSERT INTO brands (name, daily_budget, monthly_budget) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (name) DO UPDATE SET \
                 daily_budget = EXCLUDED.daily_budget, \
                 monthly_budget = EXCLUDED.monthly_budget, \
                 updated_at = NOW() \
             RETURNING id",
        )
        .bind(&brand.name)
        .bind(brand.daily_budget)
        .bind(brand.monthly_budget)
        .fetch_one(&mut *tx)
        .await?;

        for campaign in &brand.campaigns {
            sqlx::query(
                "INSERT INTO campaigns (brand_id, name, allowed_start_hour, allowed_end_hour) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (brand_id, name) DO UPDATE SET \
                     allowed_start_hour = EXCLUDED.allowed_start_hour, \
                     allowed_end_hour = EXCLUDED.allowed_end_hour, \
                     updated_at = NOW()",
            )
            .bind(brand_id)
            .bind(&campaign.name)
            .bind(campaign.allowed_start_hour)
            .bind(campaign.allowed_end_hour)
            .execute(&mut *tx)
            .await?;

            count += 1;
        }
    }

    tx.commit().await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    #[test]
    fn seed_module_is_accessible() {
        // Verify the module compiles and DbError is visible from the seed module.
        // Seed-file validation is tested in adbudget-core.
        let _ = std::mem::size_of::<crate::DbError>();
    }
}
